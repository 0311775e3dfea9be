//! Upstream review comments transplanted onto a backport.
//!
//! Mailing-list replies are split into inline comments (`quote`), each
//! anchored by the lines it quotes. The resolver finds those lines in the
//! candidate patch (`resolver`), falling back to token-set similarity to
//! thread replies onto comments that were already placed (`similarity`).

mod quote;
mod resolver;
mod similarity;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use quote::parse_inline_comments;
pub use resolver::{
    resolve_comment_positions, CommentPositionResolver, COMMIT_MSG, COMMIT_MSG_HEADER_LINES,
};
pub use similarity::{token_set_ratio, MIN_THREAD_SIMILARITY};
pub use types::{
    CommentRecord, InlineComment, Submitter, UpstreamComment, DEV_NULL, MAX_CONTEXT_LINES,
};
