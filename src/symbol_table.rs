use std::collections::HashMap;

/// Byte offset of a labelled position in the assembled binary.
pub type Offset = u32;
pub type Label = String;

/// Filled in by the encoding stage once label addresses are known.
pub type SymbolTable = HashMap<Label, Offset>;
