/// Implements construction, arithmetic and formatting for a three-component value type.
///
/// The type must be a `#[repr(C)]` struct with exactly the three named fields given,
/// all of type `$type_param`. Indexing and `len()` come from the `UniformArray` derive.
#[macro_export]
macro_rules! impl_standard_traits {
    ($type_name:ident, $type_param:ident, $a:ident, $b:ident, $c:ident) => {
        impl<$type_param> $type_name<$type_param> {
            #[doc = concat!("Initializes a new [`", stringify!($type_name), "`] instance.")]
            #[inline(always)]
            pub const fn new($a: $type_param, $b: $type_param, $c: $type_param) -> Self {
                Self { $a, $b, $c }
            }

            /// Applies `f` to each component.
            #[inline]
            pub fn map<U, F>(self, mut f: F) -> $type_name<U>
            where
                F: FnMut($type_param) -> U,
            {
                $type_name {
                    $a: f(self.$a),
                    $b: f(self.$b),
                    $c: f(self.$c),
                }
            }
        }

        impl<$type_param> Copy for $type_name<$type_param> where $type_param: Copy {}

        impl<$type_param> Clone for $type_name<$type_param>
        where
            $type_param: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $a: self.$a.clone(),
                    $b: self.$b.clone(),
                    $c: self.$c.clone(),
                }
            }
        }

        impl<$type_param> Default for $type_name<$type_param>
        where
            $type_param: Default,
        {
            #[inline]
            fn default() -> Self {
                Self::new(Default::default(), Default::default(), Default::default())
            }
        }

        impl<$type_param> PartialEq for $type_name<$type_param>
        where
            $type_param: PartialEq,
        {
            fn eq(&self, other: &Self) -> bool {
                self.$a == other.$a && self.$b == other.$b && self.$c == other.$c
            }
        }

        impl<$type_param> core::fmt::Debug for $type_name<$type_param>
        where
            $type_param: core::fmt::Debug,
        {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($type_name))
                    .field(&self.$a)
                    .field(&self.$b)
                    .field(&self.$c)
                    .finish()
            }
        }

        impl<$type_param> core::ops::Mul<$type_param> for $type_name<$type_param>
        where
            $type_param: core::ops::Mul<$type_param, Output = $type_param> + Clone,
        {
            type Output = $type_name<$type_param>;

            #[inline]
            fn mul(self, rhs: $type_param) -> Self::Output {
                Self {
                    $a: self.$a * rhs.clone(),
                    $b: self.$b * rhs.clone(),
                    $c: self.$c * rhs,
                }
            }
        }

        impl<$type_param> core::ops::Add for $type_name<$type_param>
        where
            $type_param: core::ops::Add<$type_param, Output = $type_param>,
        {
            type Output = $type_name<$type_param>;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self {
                    $a: self.$a + rhs.$a,
                    $b: self.$b + rhs.$b,
                    $c: self.$c + rhs.$c,
                }
            }
        }

        impl<$type_param> core::ops::AddAssign for $type_name<$type_param>
        where
            $type_param: core::ops::AddAssign,
        {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.$a += rhs.$a;
                self.$b += rhs.$b;
                self.$c += rhs.$c;
            }
        }

        impl<$type_param> core::ops::Sub for $type_name<$type_param>
        where
            $type_param: core::ops::Sub<$type_param, Output = $type_param>,
        {
            type Output = $type_name<$type_param>;

            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self {
                    $a: self.$a - rhs.$a,
                    $b: self.$b - rhs.$b,
                    $c: self.$c - rhs.$c,
                }
            }
        }

        impl<$type_param> core::ops::Neg for $type_name<$type_param>
        where
            $type_param: core::ops::Neg<Output = $type_param>,
        {
            type Output = $type_name<$type_param>;

            #[inline]
            fn neg(self) -> Self::Output {
                Self {
                    $a: -self.$a,
                    $b: -self.$b,
                    $c: -self.$c,
                }
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower>] {
                use super::*;

                #[test]
                fn test_new_and_index() {
                    let value = $type_name::<f32>::new(1.0, 2.0, 3.0);
                    assert_eq!(value.len(), 3);
                    assert_eq!(value[0], 1.0);
                    assert_eq!(value[1], 2.0);
                    assert_eq!(value[2], 3.0);
                }

                #[test]
                fn test_arithmetic() {
                    let a = $type_name::<f32>::new(1.0, 2.0, 3.0);
                    let b = $type_name::<f32>::new(0.5, -1.0, 2.0);
                    assert_eq!(a + b, $type_name::new(1.5, 1.0, 5.0));
                    assert_eq!(a - b, $type_name::new(0.5, 3.0, 1.0));
                    assert_eq!(a * 2.0, $type_name::new(2.0, 4.0, 6.0));
                    assert_eq!(-a, $type_name::new(-1.0, -2.0, -3.0));

                    let mut c = a;
                    c += b;
                    assert_eq!(c, a + b);
                }

                #[test]
                fn test_map() {
                    let value = $type_name::<i16>::new(1, -2, 3).map(|v| v as f32 * 0.5);
                    assert_eq!(value, $type_name::new(0.5, -1.0, 1.5));
                }
            }
        }
    };
}

/// Implements lossless conversions between a three-component value type and [`Vector3`](crate::types::Vector3).
#[macro_export]
macro_rules! impl_vector3_conversions {
    ($type_name:ident, $a:ident, $b:ident, $c:ident) => {
        impl<T> From<$crate::types::Vector3<T>> for $type_name<T> {
            #[inline]
            fn from(value: $crate::types::Vector3<T>) -> Self {
                Self {
                    $a: value.x,
                    $b: value.y,
                    $c: value.z,
                }
            }
        }

        impl<T> From<$type_name<T>> for $crate::types::Vector3<T> {
            #[inline]
            fn from(value: $type_name<T>) -> Self {
                Self {
                    x: value.$a,
                    y: value.$b,
                    z: value.$c,
                }
            }
        }
    };
}
