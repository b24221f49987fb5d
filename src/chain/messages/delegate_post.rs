use super::{check_address, ModuleMessage, ModuleMsg};
use crate::chain::proto::{MsgDelegatePost, Post};
use crate::error::ClientError;

impl MsgDelegatePost {
    /// Ask `delegatee` to publish `post` on behalf of `delegator`
    pub fn new(delegator: &str, delegatee: &str, post: Post) -> Self {
        Self {
            delegator: delegator.to_string(),
            delegatee: delegatee.to_string(),
            post: Some(post),
        }
    }
}

impl ModuleMessage for MsgDelegatePost {
    const NAME: &'static str = "MsgDelegatePost";

    // The chain derives signers from the delegator only, the embedded post's author is not
    // consulted.
    fn signer(&self) -> &str {
        &self.delegator
    }

    fn validate_basic(&self, prefix: &str) -> Result<(), ClientError> {
        check_address("delegator", &self.delegator, prefix)?;
        check_address("delegatee", &self.delegatee, prefix)
    }
}

impl From<MsgDelegatePost> for ModuleMsg {
    fn from(msg: MsgDelegatePost) -> Self {
        ModuleMsg::DelegatePost(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::codec::MessageCodec;
    use crate::chain::messages::TEST_ADDRESS;

    const OTHER: &str = "cosmos142424242424242424242424242424242a7m5mu";

    fn post() -> Post {
        Post {
            author: OTHER.to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            id: 0,
        }
    }

    #[test]
    fn test_signer_ignores_post_author() {
        let msg = MsgDelegatePost::new(TEST_ADDRESS, OTHER, post());
        assert_eq!(msg.signer(), TEST_ADDRESS);
        assert!(msg.validate_basic("cosmos").is_ok());
    }

    #[test]
    fn test_nested_post_survives_any() {
        let msg = MsgDelegatePost::new(TEST_ADDRESS, OTHER, post());
        let decoded = MsgDelegatePost::from_bytes(&msg.to_any().value).unwrap();
        assert_eq!(decoded.post, Some(post()));
    }
}
