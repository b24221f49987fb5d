mod create_post;
mod delegate;
mod delegate_post;

use prost_types::Any;
use serde_json::Value;

use crate::chain::codec::MessageCodec;
use crate::chain::proto::{MsgCreatePost, MsgDelegate, MsgDelegatePost};
use crate::error::{ClientError, CodecError};

/// Helper trait implemented by every `Msg` the module accepts
pub trait ModuleMessage: MessageCodec + Into<ModuleMsg> {
    /// Short name used in error messages, e.g. "MsgCreatePost"
    const NAME: &'static str;

    /// Address the chain treats as the signer of this message
    fn signer(&self) -> &str;

    /// Stateless checks, matching the chain's `ValidateBasic`. Addresses must carry the
    /// chain's account `prefix`.
    fn validate_basic(&self, prefix: &str) -> Result<(), ClientError>;

    /// Encode and wrap in an `Any` for inclusion in a `TxBody`
    fn to_any(&self) -> Any {
        Any {
            type_url: Self::type_url(),
            value: self.to_bytes(),
        }
    }
}

/// Any of the module's `Msg` types
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleMsg {
    CreatePost(MsgCreatePost),
    Delegate(MsgDelegate),
    DelegatePost(MsgDelegatePost),
}

impl ModuleMsg {
    pub fn name(&self) -> &'static str {
        match self {
            ModuleMsg::CreatePost(_) => MsgCreatePost::NAME,
            ModuleMsg::Delegate(_) => MsgDelegate::NAME,
            ModuleMsg::DelegatePost(_) => MsgDelegatePost::NAME,
        }
    }

    pub fn type_url(&self) -> String {
        match self {
            ModuleMsg::CreatePost(_) => MsgCreatePost::type_url(),
            ModuleMsg::Delegate(_) => MsgDelegate::type_url(),
            ModuleMsg::DelegatePost(_) => MsgDelegatePost::type_url(),
        }
    }

    pub fn signer(&self) -> &str {
        match self {
            ModuleMsg::CreatePost(msg) => msg.signer(),
            ModuleMsg::Delegate(msg) => msg.signer(),
            ModuleMsg::DelegatePost(msg) => msg.signer(),
        }
    }

    pub fn validate_basic(&self, prefix: &str) -> Result<(), ClientError> {
        match self {
            ModuleMsg::CreatePost(msg) => msg.validate_basic(prefix),
            ModuleMsg::Delegate(msg) => msg.validate_basic(prefix),
            ModuleMsg::DelegatePost(msg) => msg.validate_basic(prefix),
        }
    }

    pub fn to_any(&self) -> Any {
        match self {
            ModuleMsg::CreatePost(msg) => msg.to_any(),
            ModuleMsg::Delegate(msg) => msg.to_any(),
            ModuleMsg::DelegatePost(msg) => msg.to_any(),
        }
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        match self {
            ModuleMsg::CreatePost(msg) => msg.to_json(),
            ModuleMsg::Delegate(msg) => msg.to_json(),
            ModuleMsg::DelegatePost(msg) => msg.to_json(),
        }
    }

    /// Look the type URL up in the registry and decode the payload
    pub fn from_any(any: &Any) -> Result<Self, ClientError> {
        let url = any.type_url.as_str();
        if url == MsgCreatePost::type_url() {
            Ok(MsgCreatePost::from_bytes(&any.value)?.into())
        } else if url == MsgDelegate::type_url() {
            Ok(MsgDelegate::from_bytes(&any.value)?.into())
        } else if url == MsgDelegatePost::type_url() {
            Ok(MsgDelegatePost::from_bytes(&any.value)?.into())
        } else {
            Err(ClientError::UnknownTypeUrl(any.type_url.clone()))
        }
    }
}

/// Type URLs of every message the module registers
pub fn registry() -> Vec<String> {
    vec![
        MsgCreatePost::type_url(),
        MsgDelegate::type_url(),
        MsgDelegatePost::type_url(),
    ]
}

/// Shared `ValidateBasic` address check
fn check_address(role: &str, address: &str, prefix: &str) -> Result<(), ClientError> {
    match bech32::decode(address) {
        Ok((hrp, _)) if hrp.to_lowercase() != prefix => Err(ClientError::InvalidMsg(format!(
            "invalid {} address (invalid Bech32 prefix; expected {}, got {}): invalid address",
            role,
            prefix,
            hrp.to_lowercase()
        ))),
        Ok((_, data)) if !data.is_empty() => Ok(()),
        Ok(_) => Err(ClientError::InvalidMsg(format!(
            "invalid {} address (empty address payload): invalid address",
            role
        ))),
        Err(e) => Err(ClientError::InvalidMsg(format!(
            "invalid {} address ({}): invalid address",
            role, e
        ))),
    }
}

#[cfg(test)]
pub(crate) const TEST_ADDRESS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
