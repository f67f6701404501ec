/**
Provides a lisp-like syntax for constructing lists.

## Example

```rust
use symlisp::{list, Symbol, NIL};

// Create a list with 3 values inside.
let list1 = list!(Symbol::id("a"), Symbol::string("b"), NIL);
assert_eq!(list1.to_string(), "(a b NIL)");

// Create a list that splices `list1` in the second position.
let list2 = list!(Symbol::id("x"), @list1.clone(), list1);
assert_eq!(list2.to_string(), "(x a b NIL (a b NIL))");
```
*/
#[macro_export]
macro_rules! list {
    (@push $ret:ident, @ $item:expr) => {
        $ret.extend($item.iter().cloned())
    };
    (@push $ret:ident, $item:expr) => {
        $ret.push($item)
    };
    (@push $ret:ident, @ $item:expr, $($items:tt)+) => {{
        $crate::list!(@push $ret, @ $item);
        $crate::list!(@push $ret, $($items)+)
    }};
    (@push $ret:ident, $item:expr, $($items:tt)+) => {{
        $crate::list!(@push $ret, $item);
        $crate::list!(@push $ret, $($items)+)
    }};
    () => { $crate::NIL };
    ($($items:tt)+) => {{
        let mut ret: Vec<$crate::Symbol> = Vec::new();
        $crate::list!(@push ret, $($items)+);
        ret.into_iter().collect::<$crate::Symbol>()
    }};
}
