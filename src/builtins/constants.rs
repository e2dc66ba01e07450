//! Built-in constants: `pi`, `e`

use super::Entry;
use std::collections::HashMap;

pub(super) fn register(m: &mut HashMap<&'static str, Entry>) {
    m.insert("pi", Entry::Constant(std::f64::consts::PI));
    m.insert("e", Entry::Constant(std::f64::consts::E));
}
