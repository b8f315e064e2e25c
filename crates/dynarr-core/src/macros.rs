//! The `dynarr!` literal constructor.

/// Build a [`DynamicArray`](crate::DynamicArray) from a literal list.
///
/// The array is allocated with exactly as many slots as there are values,
/// and each value is cloned into place in order. Panics if the storage
/// cannot be allocated.
///
/// ```
/// use dynarr_core::dynarr;
///
/// let array = dynarr![1, 2, 3];
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.capacity(), 3);
/// assert_eq!(array[2], 3);
/// ```
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::DynamicArray::new()
    };
    ($($value:expr),+ $(,)?) => {
        match $crate::DynamicArray::from_slice(&[$($value),+]) {
            Ok(array) => array,
            Err(err) => panic!("dynarr!: {err}"),
        }
    };
}
