/// Classification of a normalization failure for the caller.
///
/// The library never decides how a failure is presented. Callers map the
/// class to their own response (an HTTP status, an exit code, a message).
///
/// | Class | Typical caller response |
/// |-------|-------------------------|
/// | `NotFound` | "Stock data not found" style message |
/// | `Upstream` | generic upstream failure |
/// | `BadInput` | the raw document itself is unreadable |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The upstream answered but the requested instrument has no data.
    NotFound,

    /// The upstream reported a failed search.
    Upstream,

    /// The raw document could not be parsed at all.
    BadInput,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::NotFound => "not_found",
            ErrorClass::Upstream => "upstream",
            ErrorClass::BadInput => "bad_input",
        }
    }
}
