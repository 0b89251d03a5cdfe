#[macro_export]
macro_rules! cpl {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::cpl!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Mapping($crate::Map::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::cpl!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Handle mappings whose values are multi-token expressions (e.g. `*name`)
    ({ $($key:literal : $value:expr),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::cpl!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Fallback: anything `Value: From` can absorb
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
