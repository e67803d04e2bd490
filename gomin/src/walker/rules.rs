//! The catalog of language constructs and the release that introduced each.

use std::fmt;

/// A language construct the walker recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    GenericFuncDecl,
    GenericTypeDecl,
    GenericFuncType,
    GenericFuncLit,
    SelfReferentialTypeParams,
    TypeAlias,
    GenericTypeAlias,
    ExtendedLiteral,
    NoFinalReturn,
    ElidedCompositeKey,
    MethodValue,
    GenericInstantiation,
    FullSlice,
    TagInsensitiveConversion,
    SliceToArrayPointer,
    SliceToArray,
    /// `min`, `max` or `clear`
    BuiltinCall(&'static str),
    /// A function of package `unsafe`
    UnsafeCall(&'static str),
    Tilde,
    SignedShift,
    OverlappingInterfaces,
    GeneralConstraints,
    RangeWithoutVars,
    RangeOverInt,
    RangeOverFunc,
    AnyBuiltin,
}

impl Construct {
    /// The highest floor of any construct.
    pub const LATEST: u32 = 26;

    /// The builtins added after the baseline, by name.
    pub const BUILTINS: [&'static str; 3] = ["min", "max", "clear"];

    /// The `unsafe` functions added after the baseline, by name.
    pub const UNSAFE_FUNCS: [&'static str; 5] =
        ["Add", "Slice", "String", "StringData", "SliceData"];

    /// The release that introduced the construct.
    pub fn floor(self) -> u32 {
        use Construct::*;
        match self {
            NoFinalReturn | MethodValue => 1,
            RangeWithoutVars => 4,
            FullSlice | ElidedCompositeKey => 5,
            TagInsensitiveConversion => 8,
            TypeAlias => 9,
            ExtendedLiteral | SignedShift => 13,
            OverlappingInterfaces => 14,
            SliceToArrayPointer => 17,
            UnsafeCall("Add" | "Slice") => 17,
            UnsafeCall(_) => 20,
            GenericFuncDecl | GenericTypeDecl | GenericFuncType | GenericFuncLit
            | GenericInstantiation | Tilde | GeneralConstraints | AnyBuiltin => 18,
            SliceToArray => 20,
            BuiltinCall(_) => 21,
            RangeOverInt => 22,
            RangeOverFunc => 23,
            GenericTypeAlias => 24,
            SelfReferentialTypeParams => 26,
        }
    }

    pub fn description(self) -> String {
        use Construct::*;
        match self {
            GenericFuncDecl => "generic func decl".into(),
            GenericTypeDecl => "generic type decl".into(),
            GenericFuncType => "generic function type".into(),
            GenericFuncLit => "generic function literal".into(),
            SelfReferentialTypeParams => {
                "generic type referring to itself in its type parameter list".into()
            }
            TypeAlias => "type alias".into(),
            GenericTypeAlias => "generic type alias".into(),
            ExtendedLiteral => "expanded numeric literal".into(),
            NoFinalReturn => "function body with no final return statement".into(),
            ElidedCompositeKey => {
                "composite literal with composite-type key and no explicit type".into()
            }
            MethodValue => "method used as value".into(),
            GenericInstantiation => "generic instantiation".into(),
            FullSlice => "slice expression with 3 indices".into(),
            TagInsensitiveConversion => "conversion between structs with differing struct tags".into(),
            SliceToArrayPointer => "conversion from slice to array pointer".into(),
            SliceToArray => "conversion from slice to array".into(),
            BuiltinCall(name) => format!("use of {} builtin", name),
            UnsafeCall(name) => format!("use of unsafe.{} builtin", name),
            Tilde => "tilde operator".into(),
            SignedShift => "signed shift count".into(),
            OverlappingInterfaces => "interface defined in terms of overlapping method sets".into(),
            GeneralConstraints => "interface containing type terms".into(),
            RangeWithoutVars => "variable-free \"for range\" statement".into(),
            RangeOverInt => "range over integer".into(),
            RangeOverFunc => "range over function".into(),
            AnyBuiltin => "\"any\" builtin".into(),
        }
    }

    /// Looks up a builtin by name, keeping the catalog's static string.
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTINS
            .into_iter()
            .find(|b| *b == name)
            .map(Construct::BuiltinCall)
    }

    /// Looks up an `unsafe` function by name.
    pub fn unsafe_func(name: &str) -> Option<Self> {
        Self::UNSAFE_FUNCS
            .into_iter()
            .find(|f| *f == name)
            .map(Construct::UnsafeCall)
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (go1.{})", self.description(), self.floor())
    }
}

/// Reports whether a numeric literal uses syntax added in Go 1.13: digit
/// separators, a base prefix or an imaginary suffix.
pub fn is_extended_literal(value: &str) -> bool {
    const PREFIXES: [&str; 6] = ["0b", "0B", "0o", "0O", "0x", "0X"];
    value.contains('_') || value.ends_with('i') || PREFIXES.iter().any(|p| value.starts_with(p))
}
