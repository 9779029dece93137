//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum EnrolmentPortError {
            Closed => "enrolment closed",
            Unavailable { message: String } => "enrolment unavailable: {message}",
            Full { capacity: u32 } => "enrolment full at {capacity}",
            Rejected { student: String, attempts: u32 } => "rejected {student} after {attempts}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(EnrolmentPortError::closed().to_string(), "enrolment closed");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = EnrolmentPortError::unavailable("pool drained");
        assert_eq!(err.to_string(), "enrolment unavailable: pool drained");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = EnrolmentPortError::full(30_u32);
        assert_eq!(err.to_string(), "enrolment full at 30");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = EnrolmentPortError::rejected("S1", 3_u32);
        assert_eq!(err.to_string(), "rejected S1 after 3");
        assert_eq!(err.clone(), err);
    }
}
