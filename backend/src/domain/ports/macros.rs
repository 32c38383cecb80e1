//! Declarative builder for driven-port error enums.
//!
//! Each variant names its display message; the macro derives
//! `thiserror::Error` and adds a snake-case constructor per variant whose
//! fields accept anything convertible into the field type:
//!
//! ```text
//! define_port_error! {
//!     pub enum StorageError {
//!         Offline => "storage offline",
//!         Rejected { message: String } => "rejected: {message}",
//!     }
//! }
//! StorageError::rejected("quota exceeded");
//! ```

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[allow(dead_code, reason = "not every port builds every variant")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[allow(dead_code, reason = "not every port builds every variant")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),+ } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Failures of an imaginary upload port.
        pub enum UploadError {
            Offline => "upload service offline",
            Rejected { message: String } => "upload rejected: {message}",
            TooLarge { limit: u64, actual: u64 } => "file of {actual} bytes exceeds {limit}",
        }
    }

    #[rstest]
    fn unit_variant_constructor() {
        assert_eq!(UploadError::offline(), UploadError::Offline);
        assert_eq!(UploadError::offline().to_string(), "upload service offline");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = UploadError::rejected("virus found");
        assert_eq!(err.to_string(), "upload rejected: virus found");
    }

    #[rstest]
    fn several_fields_keep_their_types() {
        let err = UploadError::too_large(10_u64, 12_u64);
        assert_eq!(
            err,
            UploadError::TooLarge {
                limit: 10,
                actual: 12
            }
        );
        assert_eq!(err.to_string(), "file of 12 bytes exceeds 10");
    }
}
