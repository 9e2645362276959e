/// Convenient macro for constructing a context [`Value`][crate::Value].
///
/// The top level is always a map; keys are identifiers, values are nested
/// maps `{ ... }`, lists `[ ... ]`, `None`, or any expression that converts
/// into a [`Value`][crate::Value].
///
/// ```
/// let ctx = arbor::value! {
///     user: { name: "John", age: 42 },
///     tags: ["a", "b"],
///     manager: None,
/// };
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)*) => {
        $crate::_value!({ $($tt)* })
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    // List muncher, elements accumulate in the brackets.
    (@list [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };
    (@list [$($elems:expr,)*] None $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::Value::None,] $($($rest)*)?)
    };
    (@list [$($elems:expr,)*] [$($list:tt)*] $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!([$($list)*]),] $($($rest)*)?)
    };
    (@list [$($elems:expr,)*] {$($map:tt)*} $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!({$($map)*}),] $($($rest)*)?)
    };
    (@list [$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::Value::from($next),] $($($rest)*)?)
    };

    // Map muncher, each entry is inserted into `$map`.
    (@map $map:ident) => {};
    (@map $map:ident $key:ident : None $(, $($rest:tt)*)?) => {
        $map.insert(::std::string::String::from(stringify!($key)), $crate::Value::None);
        $crate::_value!(@map $map $($($rest)*)?);
    };
    (@map $map:ident $key:ident : [$($list:tt)*] $(, $($rest:tt)*)?) => {
        $map.insert(::std::string::String::from(stringify!($key)), $crate::_value!([$($list)*]));
        $crate::_value!(@map $map $($($rest)*)?);
    };
    (@map $map:ident $key:ident : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $map.insert(::std::string::String::from(stringify!($key)), $crate::_value!({$($inner)*}));
        $crate::_value!(@map $map $($($rest)*)?);
    };
    (@map $map:ident $key:ident : $value:expr $(, $($rest:tt)*)?) => {
        $map.insert(::std::string::String::from(stringify!($key)), $crate::Value::from($value));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (None) => {
        $crate::Value::None
    };
    ([ $($tt:tt)* ]) => {
        $crate::Value::List($crate::_value!(@list [] $($tt)*))
    };
    ({ $($tt:tt)* }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Map::new();
        $crate::_value!(@map map $($tt)*);
        $crate::Value::Map(map)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
