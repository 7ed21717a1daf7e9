//! Analytics Response Model
//!
//! The data service answers with loosely shaped JSON. It is parsed once,
//! here, into a closed set of types so the dispatcher never inspects raw
//! values:
//!
//! - `AnalyticsResponse`: up to four optional `Section`s
//! - `Section`: entries plus a keyed lookup by `Category`
//! - `EntryValue`: `Keyed`, `List` or `Scalar`
//! - `Scalar`: number, text, bool, null, or an unsupported nested value

mod error;
mod types;

pub use error::ResponseError;
pub use types::{AnalyticsResponse, Entry, EntryValue, Scalar, Section, SectionKind};
