/// Proof that the caller presented the admin token.
///
/// Every supervisor operation takes a `&Grant`; the only way to obtain one
/// is [`TokenValidator::authorize`](crate::TokenValidator::authorize).
#[derive(Debug)]
pub struct Grant {
    _private: (),
}

impl Grant {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}
