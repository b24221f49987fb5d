use super::{check_address, ModuleMessage, ModuleMsg};
use crate::chain::proto::MsgDelegate;
use crate::error::ClientError;

impl MsgDelegate {
    pub fn new(delegator: &str, delegatee: &str) -> Self {
        Self {
            delegator: delegator.to_string(),
            delegatee: delegatee.to_string(),
        }
    }
}

impl ModuleMessage for MsgDelegate {
    const NAME: &'static str = "MsgDelegate";

    fn signer(&self) -> &str {
        &self.delegator
    }

    fn validate_basic(&self, prefix: &str) -> Result<(), ClientError> {
        check_address("delegator", &self.delegator, prefix)?;
        check_address("delegatee", &self.delegatee, prefix)
    }
}

impl From<MsgDelegate> for ModuleMsg {
    fn from(msg: MsgDelegate) -> Self {
        ModuleMsg::Delegate(msg)
    }
}
