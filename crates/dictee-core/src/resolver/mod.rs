//! Drug resolver for dictated segments.
//!
//! Pipeline: Normalization → Tokenization → Phonetic encoding → Ranking
//!
//! Everything here is a pure function of its input and the lexicon. The only
//! memoization ([`PhoneticCache`]) lives for a single matching call.

mod matcher;
mod normalizer;
mod phonetic;
mod similarity;
mod tokens;

pub use matcher::*;
pub use normalizer::*;
pub use phonetic::*;
pub use similarity::*;
pub use tokens::*;
