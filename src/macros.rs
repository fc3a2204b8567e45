/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys must be literals. Anything that is not `null`, a boolean,
/// an array or an object goes through `Value::from`.
///
/// ```rust
/// use nbt_codec::{value, Value};
///
/// let v = value!({"name": "Steve", "pos": [1.5, -64, 3], "op": true, "extra": null});
/// assert_eq!(v.get("name"), Some(&Value::from("Steve")));
/// assert_eq!(v.get("extra"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! value {
    (@array [$($out:expr,)*]) => {
        $crate::Value::Array(vec![$($out,)*])
    };
    (@array [$($out:expr,)*] , $($rest:tt)*) => {
        $crate::value!(@array [$($out,)*] $($rest)*)
    };
    (@array [$($out:expr,)*] - $num:literal $($rest:tt)*) => {
        $crate::value!(@array [$($out,)* $crate::Value::from(-$num),] $($rest)*)
    };
    (@array [$($out:expr,)*] $next:tt $($rest:tt)*) => {
        $crate::value!(@array [$($out,)* $crate::value!($next),] $($rest)*)
    };

    (@object $object:ident) => {};
    (@object $object:ident , $($rest:tt)*) => {
        $crate::value!(@object $object $($rest)*);
    };
    (@object $object:ident $key:literal : - $num:literal $($rest:tt)*) => {
        $object.insert(($key).to_string(), $crate::Value::from(-$num));
        $crate::value!(@object $object $($rest)*);
    };
    (@object $object:ident $key:literal : $value:tt $($rest:tt)*) => {
        $object.insert(($key).to_string(), $crate::value!($value));
        $crate::value!(@object $object $($rest)*);
    };

    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    ([ $($elem:tt)* ]) => {
        $crate::value!(@array [] $($elem)*)
    };
    ({ $($member:tt)* }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::ValueMap::new();
        $crate::value!(@object object $($member)*);
        $crate::Value::Object(object)
    }};
    ($e:expr) => {
        $crate::Value::from($e)
    };
}
