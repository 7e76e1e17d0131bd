use opal_errors::OpalError;

/// Bounds-checked cursor over untrusted bytecode.
pub(crate) struct Reader<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Reader<'a> {
        Reader { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    pub fn end_of_stream(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Fails with the offset of the instruction being read, `start`, so errors
    /// point at the tag rather than into its payload.
    pub fn get_byte(&mut self, start: usize) -> Result<u8, OpalError> {
        Ok(self.get_bytes(start, 1)?[0])
    }

    pub fn get_bytes(&mut self, start: usize, count: usize) -> Result<&'a [u8], OpalError> {
        if count > self.remaining() {
            return Err(OpalError::truncated(start, count, self.remaining()));
        }

        let bytes = &self.input[self.position..self.position + count];
        self.position += count;

        Ok(bytes)
    }

    pub fn get_array<const N: usize>(&mut self, start: usize) -> Result<[u8; N], OpalError> {
        let mut array = [0; N];
        array.copy_from_slice(self.get_bytes(start, N)?);

        Ok(array)
    }
}
