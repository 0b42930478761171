//! Assembling module
//!
//!     The assembling stages run after the phase 1 state machine and operate on finished
//!     paragraphs, never on lines. Neither stage mutates its input: every merged paragraph is a
//!     new record whose page comes from the first entry of the run it replaces.
//!
//!     Phase 1 closes a buffer whenever a running header, footer or blank line interrupts it,
//!     which is right for the state machine but wrong for readers: a stanza that crosses a
//!     page break comes out as two verse blocks, and a sentence that crosses it as two prose
//!     fragments. The two stages repair that:
//!
//! Current stages:
//!
//!     - `block_merge` (phase 2): collapses consecutive verse blocks, and consecutive
//!       dialogue blocks, into one block each. See [block_merge].
//!     - `recombine` (phase 3): joins prose and dialogue fragments until the text reaches
//!       closing punctuation. See [recombine].

pub mod block_merge;
pub mod recombine;

pub use block_merge::{merge_blocks, BlockMerge};
pub use recombine::{recombine, Recombination};
