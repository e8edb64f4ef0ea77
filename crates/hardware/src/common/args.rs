//! Runtime argument conventions.
//!
//! Arguments forwarded to a simulation are opaque to the driver. Models read
//! them using the plusarg convention of RTL simulators: `+name` is a flag and
//! `+name=value` carries a value. Anything not starting with `+` is ignored by
//! these helpers.

/// A parsed `+name[=value]` argument borrowed from the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlusArg<'a> {
    /// Name between the `+` and the first `=`.
    pub name: &'a str,
    /// Text after the first `=`, or `""` for a bare flag.
    pub value: &'a str,
}

impl<'a> PlusArg<'a> {
    /// Parses a single argument, returning `None` if it is not a plusarg.
    ///
    /// # Examples
    ///
    /// ```
    /// use tbsim_core::common::args::PlusArg;
    ///
    /// let arg = PlusArg::parse("+vectors=4").unwrap();
    /// assert_eq!(arg.name, "vectors");
    /// assert_eq!(arg.value, "4");
    ///
    /// assert_eq!(PlusArg::parse("+verbose").unwrap().value, "");
    /// assert!(PlusArg::parse("--verbose").is_none());
    /// ```
    pub fn parse(arg: &'a str) -> Option<Self> {
        let body = arg.strip_prefix('+')?;
        if body.is_empty() {
            return None;
        }
        Some(match body.split_once('=') {
            Some((name, value)) => Self { name, value },
            None => Self {
                name: body,
                value: "",
            },
        })
    }
}

/// Returns the value of the first `+name` or `+name=value` argument.
pub fn find<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| PlusArg::parse(arg))
        .find(|arg| arg.name == name)
        .map(|arg| arg.value)
}
