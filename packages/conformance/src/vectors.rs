//! Structured test vectors reconstructed from a response file

use std::fmt::Write as _;

/// One message and its expected digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// Message length in bits, as declared by `Len = N`
    pub length_bits: u64,
    /// Message bytes; empty (but still a real buffer) when `length_bits == 0`
    pub message: Vec<u8>,
    /// Expected digest
    pub digest: Vec<u8>,
}

impl TestVector {
    /// Message length in bytes implied by `length_bits`
    #[must_use]
    pub fn declared_len_bytes(&self) -> u64 {
        self.length_bits / 8
    }

    /// Whether this is the zero-length message
    #[must_use]
    pub fn is_empty_message(&self) -> bool {
        self.length_bits == 0
    }

    /// Render the record back into `Len`/`Msg`/`MD` lines
    ///
    /// Hex is lower-case and the zero-length message is written as `Msg = 00`,
    /// which is how response files spell it.
    #[must_use]
    pub fn to_hex_record(&self) -> String {
        let message = if self.is_empty_message() {
            "00".to_string()
        } else {
            hex::encode(&self.message)
        };
        let mut record = String::new();
        let _ = writeln!(record, "Len = {}", self.length_bits);
        let _ = writeln!(record, "Msg = {message}");
        let _ = writeln!(record, "MD = {}", hex::encode(&self.digest));
        record
    }
}

/// Every vector of one response file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorFile {
    /// Digest length in bytes from the `[L = N]` header
    pub digest_length_bytes: usize,
    /// Vectors in file order
    pub vectors: Vec<TestVector>,
}

impl VectorFile {
    /// Number of vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the file held no vectors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Iterate over the vectors in file order
    pub fn iter(&self) -> std::slice::Iter<'_, TestVector> {
        self.vectors.iter()
    }

    /// The first zero-length vector, if the file has one
    #[must_use]
    pub fn empty_message(&self) -> Option<&TestVector> {
        self.vectors.iter().find(|v| v.is_empty_message())
    }

    /// Expected digest of the empty message, if the file has a zero-length vector
    #[must_use]
    pub fn empty_message_digest(&self) -> Option<&[u8]> {
        self.empty_message().map(|v| v.digest.as_slice())
    }
}

impl<'a> IntoIterator for &'a VectorFile {
    type Item = &'a TestVector;
    type IntoIter = std::slice::Iter<'a, TestVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}
