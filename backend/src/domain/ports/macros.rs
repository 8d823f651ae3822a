//! Helper macro for declaring port error enums.
//!
//! Every port error here is a set of variants carrying a single `message`
//! string; the macro derives `thiserror::Error` and generates snake_case
//! constructors that accept anything `Into<String>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Connection => "connection failed: {message}",
            WriteFailed => "write failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_message_fields() {
        let err = ExamplePortError::connection("refused");
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[test]
    fn variants_compare_by_message() {
        assert_eq!(
            ExamplePortError::write_failed("oops"),
            ExamplePortError::WriteFailed {
                message: "oops".to_owned()
            }
        );
    }
}
