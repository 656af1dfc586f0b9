use std::cmp::Ordering;
use std::fmt;

use crate::descriptor::Descriptor;
use crate::error::ParseError;

fn inc1(x: i32) -> i32 {
    x.wrapping_add(1)
}

fn inc2(x: i32) -> i32 {
    x.wrapping_add(2)
}

fn inc3(x: i32) -> i32 {
    x.wrapping_add(3)
}

/// Functions that can be named in a literal.
const REGISTRY: [(&str, fn(i32) -> i32); 3] = [("inc1", inc1), ("inc2", inc2), ("inc3", inc3)];

/// A reference to one of the registered `i32 -> i32` functions.
#[derive(Clone, Copy)]
pub struct FunctionRef {
    name: &'static str,
    func: fn(i32) -> i32,
}

impl FunctionRef {
    /// Looks up a registered function by name.
    pub fn lookup(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|&(name, func)| Self { name, func })
    }

    /// The name the function was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function's address, which is what orders function references.
    pub fn address(&self) -> usize {
        self.func as usize
    }

    /// Calls the function.
    pub fn call(&self, x: i32) -> i32 {
        (self.func)(x)
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for FunctionRef {}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRef")
            .field("name", &self.name)
            .field("address", &format_args!("{:#x}", self.address()))
            .finish()
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func@{:x}", self.address())
    }
}

/// [`FunctionRef`]s, parsed from their registered names (`inc1`, `inc2`, `inc3`) and
/// ordered by address.
///
/// Addresses differ from build to build, and so does the order and the printed form
/// (`Func@<hex address>`). A printed function reference can't be parsed back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FunctionType;

impl Descriptor for FunctionType {
    type Value = FunctionRef;

    fn name(&self) -> &'static str {
        "FUNCTION"
    }

    fn clone_value(&self, value: &FunctionRef) -> FunctionRef {
        *value
    }

    fn parse(&self, text: &str) -> Result<FunctionRef, ParseError> {
        let text = text.trim();
        FunctionRef::lookup(text).ok_or_else(|| ParseError::UnknownFunction(text.to_owned()))
    }

    fn compare(&self, a: &FunctionRef, b: &FunctionRef) -> Ordering {
        a.address().cmp(&b.address())
    }

    fn print(&self, value: &FunctionRef) -> String {
        value.to_string()
    }
}
