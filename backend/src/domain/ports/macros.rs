//! Helper macro for message-carrying port error enums.
//!
//! Every variant holds a single `message: String` and displays as
//! `"<prefix>: <message>"`. The macro generates a snake-case constructor per
//! variant, a `message()` accessor that strips the prefix, and
//! `is_retryable()`, which is true only for variants marked `retryable`.

macro_rules! define_port_error {
    (@retry) => {
        false
    };

    (@retry retryable) => {
        true
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $prefix:literal $(; $retry:ident)?
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{prefix}: {message}", prefix = $prefix)]
                $variant {
                    /// Detail reported by the adapter.
                    message: String,
                },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                )*
            }

            /// Detail carried by the error, without the category prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)*
                }
            }

            /// Whether retrying the failed call may succeed.
            pub fn is_retryable(&self) -> bool {
                match self {
                    $(Self::$variant { .. } => define_port_error!(@retry $($retry)?),)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
