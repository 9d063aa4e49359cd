use subtle::ConstantTimeEq;

/// Constant-time equality over textual hash encodings.
///
/// Running time depends only on the operand lengths, never on where the
/// strings first differ. A length mismatch short-circuits to `false`; lengths
/// are not treated as secret here, only byte content is.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
