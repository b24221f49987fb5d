use super::{check_address, ModuleMessage, ModuleMsg};
use crate::chain::proto::MsgCreatePost;
use crate::error::ClientError;

impl MsgCreatePost {
    pub fn new(author: &str, title: &str, body: &str) -> Self {
        Self {
            author: author.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

impl ModuleMessage for MsgCreatePost {
    const NAME: &'static str = "MsgCreatePost";

    fn signer(&self) -> &str {
        &self.author
    }

    fn validate_basic(&self, prefix: &str) -> Result<(), ClientError> {
        check_address("creator", &self.author, prefix)
    }
}

impl From<MsgCreatePost> for ModuleMsg {
    fn from(msg: MsgCreatePost) -> Self {
        ModuleMsg::CreatePost(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::codec::MessageCodec;
    use crate::chain::messages::TEST_ADDRESS;

    #[test]
    fn test_signer_is_author() {
        let msg = MsgCreatePost::new(TEST_ADDRESS, "hello", "world");
        assert_eq!(msg.signer(), TEST_ADDRESS);
        assert!(msg.validate_basic("cosmos").is_ok());
    }

    #[test]
    fn test_invalid_author_rejected() {
        let msg = MsgCreatePost::new("alice", "hello", "world");
        let err = msg.validate_basic("cosmos").unwrap_err();
        assert!(matches!(err, ClientError::InvalidMsg(_)));
        assert!(err.to_string().starts_with("invalid creator address"));
    }

    #[test]
    fn test_any_carries_encoded_message() {
        let msg = MsgCreatePost::new(TEST_ADDRESS, "t", "b");
        let any = msg.to_any();
        assert_eq!(MsgCreatePost::from_bytes(&any.value).unwrap(), msg);
    }
}
