//! Identifier newtypes.
//!
//! Platform identifiers are 64-bit snowflakes. Keeping them in distinct types
//! stops a channel id from being passed where a message id is expected.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

snowflake!(
    /// Guild (server) identifier.
    GuildId
);
snowflake!(
    /// Channel identifier.
    ChannelId
);
snowflake!(
    /// User identifier.
    UserId
);
snowflake!(
    /// Message identifier. Snowflakes sort in creation order.
    MessageId
);
snowflake!(
    /// Question identifier allocated by the record store.
    QuestionId
);
