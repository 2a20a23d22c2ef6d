//! Error type shared by the content tables, configuration and page startup.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    /// A shuffle pool was built from no items; draws would never terminate.
    #[error("content pool `{what}` is empty")]
    EmptyPool { what: &'static str },
    #[error("required page element `{0}` not found")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl ProposalError {
    pub(crate) fn js(err: JsValue) -> Self {
        ProposalError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<ProposalError> for JsValue {
    fn from(err: ProposalError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
