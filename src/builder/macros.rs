//! Macros for ergonomic hierarchy construction.

/// Generate a state id enum and its State trait implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` and `Debug`;
/// each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
/// use statecraft::core::State;
///
/// state_enum! {
///     pub enum Phone {
///         Top,
///         Idle,
///         Call,
///         Dialing,
///         Talking,
///     }
/// }
///
/// assert_eq!(Phone::Dialing.name(), "Dialing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
