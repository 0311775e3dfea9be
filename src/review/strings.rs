//! Message templates for review verdicts.
//!
//! Every template starts and ends with a newline so they can be appended
//! back to back. Templates that take arguments are functions.

use super::strategy::Strategy;

pub const HEADER: &str = "
-- Automated message --
";

pub const FOUND_ISSUES_HEADER_SINGLE: &str = "
The following issue was found with your patch:
";

pub const FOUND_ISSUES_HEADER_MULTIPLE: &str = "
The following issues were found with your patch:
";

pub const SUCCESS: &str = "
No changes have been detected between this change and its upstream source!
";

pub const CLEAN_BACKPORT_HEADER: &str = "
This change has a BACKPORT prefix, however it does not differ from its upstream
source. The BACKPORT prefix should be primarily used for patches which were
altered during the cherry-pick (due to conflicts or downstream inconsistencies).
";

pub const FEEDBACK_AFTER_ISSUES: &str = "
Enough with the bad news! Here's some more feedback on your patch:
";

pub const MISSING_HASH_HEADER: &str = "
Your commit message is missing the upstream commit hash. It should be in the
form:
";

pub const MISSING_HASH_FOOTER: &str = "
Hint: Use the '-x' argument of git cherry-pick to add this automagically
";

pub const INVALID_HASH_HEADER: &str = "
The commit hash(es) you've provided in your commit message could not be found
upstream. The following hash/remote/branch tuple(s) were tried:
";

pub const MISSING_AM: &str = "
Your commit message is missing the patchwork URL. It should be in the
form:
    (am from https://patchwork.kernel.org/.../)
";

pub const DIFFERS_HEADER: &str = "
This patch differs from the source commit.
";

pub const ALTERED_UPSTREAM: &str = "
Since this is not labeled as BACKPORT, it shouldn't. Either this reviewing
script is incorrect (totally possible, pls send patches!), or something changed
when this was backported. If the backport required changes, please consider
using the BACKPORT label with a description of your downstream changes in your
commit message

Below is a diff of the upstream patch referenced in this commit message, vs this
patch.

";

pub const ALTERED_FROMLIST: &str = "
Changes have been detected between the patch on the list and this backport.
Since the diff algorithm used by the developer to generate this patch may
differ from the one used to review, this could be a false negative.

If the backport required changes to the FROMLIST patch, please consider adding
a BACKPORT label to your subject.

Below is the generated diff of the fromlist patch referenced in this commit
message vs this patch.

";

pub const BACKPORT_FROMLIST: &str = "
Below is the generated diff of the fromlist patch referenced in this commit
message vs this patch. This message is posted to make reviewing backports
easier.

Since the diff algorithm used by the developer to generate this patch may
differ from the one used to review, there is a higher chance that this diff is
incorrect. So take this with a grain of salt.

";

pub const CLEAR_VOTES: &str = "
Changes were detected between this patch and the upstream version referenced in
the commit message.

Comparing FROMLIST backports is less reliable than UPSTREAM/FROMGIT patches
since the diff algorithms can differ between developer machine and this
review script. As such, it's usually not worthwhile posting the diff. Looks like
you'll have to do this review the old fashioned way!
";

pub const BACKPORT_DIFF: &str = "
This is expected, and this message is posted to make reviewing backports easier.

";

pub const FOUND_FIXES_REF_HEADER: &str = "
 !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
 !! NOTE: This patch has been referenced in the Fixes: tag of another commit. If
 !!       you haven't already, consider backporting the following patch[es]:";

pub const FIXES_REF_FOOTER: &str = "
 !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
";

pub const FOOTER: &str = "
To learn more about backporting kernel patches to Chromium OS, check out:
https://chromium.googlesource.com/chromiumos/docs/+/master/kernel_faq.md#UPSTREAM_BACKPORT_FROMLIST_and-you
";

pub const REVIEW_SEPARATOR: &str = "
------------------
";

pub const PATCH_IN_MAINLINE: &str = "
This patch is labeled as FROMGIT, however it seems like it's already been
applied to mainline. Please revise your patch subject to replace FROMGIT with
UPSTREAM.
";

pub const UPSTREAM_COMMENT_HEADER: &str = "
This patch has comments upstream. Wherever possible, those comments have been
duplicated on this review, but there may be some that could not be. To view the
comments, follow the patchwork link in the commit message or click on the links
below.
";

/// Certification words for positive votes.
pub const SWAG: &[&str] = &[
    "Frrrresh",
    "Crisper Than Cabbage",
    "Awesome",
    "Ahhhmazing",
    "Cool As A Cucumber",
    "Most Excellent",
    "Eximious",
    "Prestantious",
    "Supernacular",
    "Bodacious",
    "Blue Chip",
    "Blue Ribbon",
    "Cracking",
    "Dandy",
    "Dynamite",
    "Fab",
    "Fabulous",
    "Fantabulous",
    "Scrumtrulescent",
    "First Class",
    "First Rate",
    "First String",
    "Five Star",
    "Gangbusters",
    "Grand",
    "Groovy",
    "HYPE",
    "Jim-Dandy",
    "Snazzy",
    "Marvelous",
    "Nifty",
    "Par Excellence",
    "Peachy Keen",
    "PHAT",
    "Prime",
    "Prizewinning",
    "Quality",
    "Radical",
    "Righteous",
    "Sensational",
    "Slick",
    "Splendid",
    "Lovely",
    "Stellar",
    "Sterling",
    "Superb",
    "Superior",
    "Superlative",
    "Supernal",
    "Swell",
    "Terrific",
    "Tip-Top",
    "Top Notch",
    "Top Shelf",
    "Unsurpassed",
    "Wonderful",
];

/// Pick a certification word. The same seed always yields the same word.
pub fn swag_word(seed: u64) -> &'static str {
    SWAG[(seed % SWAG.len() as u64) as usize]
}

pub fn positive_vote(swag: &str) -> String {
    format!("\nThis patch is certified {} by backport-audit!\n", swag)
}

pub fn missing_fields(fields: &[String]) -> String {
    format!(
        "\nYour commit message is missing the following required field(s):\n    {}\n",
        fields.join(", ")
    )
}

pub fn invalid_hash_line(tried: &str) -> String {
    format!("\n  {}\n", tried)
}

pub fn fixes_ref_line(line: &str) -> String {
    format!("\n !!  {}", line)
}

pub fn issue_separator(n: usize) -> String {
    format!("\n>>>>>>> Issue {}\n", n)
}

pub fn feedback_separator(n: usize) -> String {
    format!("\n>>>>>> Feedback {}\n", n)
}

pub fn web_link(link: &str) -> String {
    format!(
        "\nIf you would like to view the upstream patch on the web, follow this link:\n{}\n",
        link
    )
}

pub fn patch_not_in_mainline(is_backport: bool) -> String {
    let (label, prefix) = if is_backport {
        ("BACKPORT", "BACKPORT: ")
    } else {
        ("UPSTREAM", "")
    };
    format!(
        "\nThis patch is labeled as {}, however it seems like it has not\n\
         been applied to mainline. If your patch is in a maintainer tree, please use the\n\
         {}FROMGIT subject prefix.\n",
        label, prefix
    )
}

/// Inline comment carrying an upstream reply. `quoted` is already `> `-prefixed.
pub fn upstream_inline_comment(name: &str, email: &str, quoted: &str, url: &str) -> String {
    format!(
        "\n-- Upstream comment by {} <{}> --\n{}\n--\nsrc: {}\n",
        name, email, quoted, url
    )
}

pub fn upstream_comment_line(name: &str, email: &str, url: &str) -> String {
    format!("\n  From {} <{}>: {}", name, email, url)
}

/// Templates that differ between reviewer strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewStrings {
    /// Example footer shown when a hash is missing or wrong.
    pub hash_example: &'static str,
    pub invalid_hash_footer: &'static str,
    /// Suggested prefix when a BACKPORT turns out to be clean.
    pub clean_backport_footer: &'static str,
}

impl ReviewStrings {
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Upstream => Self {
                hash_example: "
    (cherry picked from commit <commit SHA>)
",
                invalid_hash_footer: "
Please double check your commit hash is valid in the upstream tree and the hash
is formatted properly in your commit message (see below):
",
                clean_backport_footer: "
Consider changing your subject prefix to UPSTREAM to better reflect the
contents of this patch.
",
            },
            Strategy::Fromgit => Self {
                hash_example: "
    (cherry picked from commit <commit SHA>
     <remote git url> <remote git branch>)
",
                invalid_hash_footer: "
Please double check your commit hash is valid in the upstream tree, and please
fully specify the remote tree and branch for FROMGIT changes (see below):
",
                clean_backport_footer: "
Consider changing your subject prefix to FROMGIT to better reflect the
contents of this patch.
",
            },
            Strategy::Fromlist => Self {
                hash_example: "",
                invalid_hash_footer: "",
                clean_backport_footer: "
Consider changing your subject prefix to FROMLIST to better reflect the
contents of this patch.
",
            },
            Strategy::Chromium => Self {
                hash_example: "",
                invalid_hash_footer: "",
                clean_backport_footer: "",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swag_is_deterministic() {
        assert_eq!(swag_word(7), swag_word(7));
        assert_eq!(swag_word(0), "Frrrresh");
        assert_eq!(swag_word(SWAG.len() as u64), "Frrrresh");
    }

    #[test]
    fn not_in_mainline_names_the_label() {
        assert!(patch_not_in_mainline(false).contains("labeled as UPSTREAM"));
        assert!(patch_not_in_mainline(true).contains("BACKPORT: FROMGIT"));
    }

    #[test]
    fn templates_are_newline_framed() {
        for template in [HEADER, SUCCESS, DIFFERS_HEADER, FOOTER, REVIEW_SEPARATOR] {
            assert!(template.starts_with('\n'));
            assert!(template.ends_with('\n'));
        }
    }

    #[test]
    fn strategy_footers_differ() {
        let upstream = ReviewStrings::for_strategy(Strategy::Upstream);
        let fromgit = ReviewStrings::for_strategy(Strategy::Fromgit);
        assert!(upstream.clean_backport_footer.contains("UPSTREAM"));
        assert!(fromgit.hash_example.contains("<remote git url>"));
    }
}
