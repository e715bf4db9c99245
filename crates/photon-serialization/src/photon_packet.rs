use crate::DecodeError;
use byteorder::{BigEndian, ByteOrder};

//region Photon Packet

/// A reusable byte buffer with a read cursor, holding one raw frame at a time.
///
/// The same packet is refilled every control cycle. Refilling clears the bytes and
/// resets the cursor, but never frees the allocation, so the steady state path does
/// not allocate. Capacity only grows to the exact size of the largest frame seen.
///
/// Every decode call is bounds checked: reading past the end fails with
/// [`DecodeError::Truncated`] and leaves the cursor untouched.
///
/// # Example
/// ```
/// use photon_serialization::PhotonPacket;
///
/// let mut packet = PhotonPacket::new_empty();
/// packet.write_data_by_copy_and_reset(&[0x40, 0x29, 0, 0, 0, 0, 0, 0, 3]);
/// assert_eq!(packet.decode_f64().unwrap(), 12.5);
/// assert_eq!(packet.decode_u8().unwrap(), 3);
/// assert_eq!(packet.get_number_of_bytes_remaining(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhotonPacket {
    /// The raw frame bytes
    bytes: Vec<u8>,
    /// Index of the next byte to decode. Never exceeds bytes.len()
    read_position: usize,
}

impl PhotonPacket {
    //region Constructors

    /// Creates a new empty packet without allocating.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::PhotonPacket;
    ///
    /// let packet = PhotonPacket::new_empty();
    /// assert_eq!(packet.get_number_of_bytes_used(), 0);
    /// assert_eq!(packet.get_read_position(), 0);
    /// ```
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Creates an empty packet with room for `capacity` bytes.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::PhotonPacket;
    ///
    /// let packet = PhotonPacket::with_capacity(512);
    /// assert!(packet.get_number_of_bytes_allocated() >= 512);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            read_position: 0,
        }
    }

    //endregion

    //region Writing Data

    /// Empties the packet and rewinds the cursor. Does not free allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.read_position = 0;
    }

    /// Refills the packet using a callback, then rewinds the cursor.
    ///
    /// The callback receives the cleared byte vector and is expected to fill it in
    /// place (typically a transport copying an entry's bytes). If the callback fails,
    /// the packet is left empty.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::PhotonPacket;
    ///
    /// let mut packet = PhotonPacket::new_empty();
    /// packet
    ///     .try_write_data_and_reset(|bytes| {
    ///         bytes.extend_from_slice(&[1, 2, 3]);
    ///         Ok::<(), ()>(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(packet.get_byte_ref(), &[1, 2, 3]);
    ///
    /// let failed = packet.try_write_data_and_reset(|bytes| {
    ///     bytes.push(9);
    ///     Err("transport down")
    /// });
    /// assert!(failed.is_err());
    /// assert_eq!(packet.get_number_of_bytes_used(), 0);
    /// ```
    pub fn try_write_data_and_reset<F, E>(&mut self, byte_writer: F) -> Result<(), E>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), E>,
    {
        self.clear();
        let written = byte_writer(&mut self.bytes);
        if written.is_err() {
            self.bytes.clear();
        }
        written
    }

    /// Replaces the contents with a copy of `new_data` and rewinds the cursor.
    /// Grows the allocation only if `new_data` does not fit, and then exactly.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::PhotonPacket;
    ///
    /// let mut packet = PhotonPacket::new_empty();
    /// packet.write_data_by_copy_and_reset(&[0u8; 100]);
    /// let allocated = packet.get_number_of_bytes_allocated();
    ///
    /// packet.write_data_by_copy_and_reset(&[0u8; 10]);
    /// assert_eq!(packet.get_number_of_bytes_used(), 10);
    /// assert_eq!(packet.get_number_of_bytes_allocated(), allocated);
    /// ```
    pub fn write_data_by_copy_and_reset(&mut self, new_data: &[u8]) {
        self.clear();
        self.bytes.reserve_exact(new_data.len());
        self.bytes.extend_from_slice(new_data);
    }

    /// Reserves room for `additional` more bytes to be encoded, exactly.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.bytes.reserve_exact(additional);
    }

    /// Appends a big-endian binary64 float.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::PhotonPacket;
    ///
    /// let mut packet = PhotonPacket::new_empty();
    /// packet.encode_f64(-3.25);
    /// assert_eq!(packet.get_byte_ref(), &(-3.25f64).to_be_bytes());
    /// ```
    pub fn encode_f64(&mut self, value: f64) {
        let mut field = [0u8; 8];
        BigEndian::write_f64(&mut field, value);
        self.bytes.extend_from_slice(&field);
    }

    /// Appends a single byte.
    pub fn encode_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    //endregion

    //region Reading Data

    /// Decodes a big-endian binary64 float at the cursor and advances past it.
    pub fn decode_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(BigEndian::read_f64(self.take_bytes(8)?))
    }

    /// Decodes a single byte at the cursor and advances past it.
    ///
    /// # Example
    /// ```
    /// use photon_serialization::{DecodeError, PhotonPacket};
    ///
    /// let mut packet = PhotonPacket::new_empty();
    /// assert_eq!(
    ///     packet.decode_u8(),
    ///     Err(DecodeError::Truncated { needed: 1, available: 0 })
    /// );
    /// ```
    pub fn decode_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_bytes(1)?[0])
    }

    /// Fails with [`DecodeError::Truncated`] unless at least `count` more bytes can
    /// be decoded. Does not move the cursor.
    pub fn verify_bytes_remaining(&self, count: usize) -> Result<(), DecodeError> {
        if self.get_number_of_bytes_remaining() < count {
            return Err(DecodeError::Truncated {
                needed: self.read_position + count,
                available: self.bytes.len(),
            });
        }
        Ok(())
    }

    //endregion

    //region Get Properties

    /// Returns the raw bytes currently held, independent of the cursor.
    pub fn get_byte_ref(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get_number_of_bytes_used(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the memory allocated for the byte vector.
    pub fn get_number_of_bytes_allocated(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn get_read_position(&self) -> usize {
        self.read_position
    }

    pub fn get_number_of_bytes_remaining(&self) -> usize {
        self.bytes.len() - self.read_position
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    //endregion

    /// Frees any unused memory allocation in the byte vector.
    pub fn free_unused_allocation(&mut self) {
        self.bytes.shrink_to_fit()
    }

    //region Internal

    fn take_bytes(&mut self, count: usize) -> Result<&[u8], DecodeError> {
        self.verify_bytes_remaining(count)?;
        let start = self.read_position;
        self.read_position += count;
        Ok(&self.bytes[start..start + count])
    }

    //endregion
}

impl std::fmt::Display for PhotonPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PhotonPacket({} of {} bytes read, {} allocated)",
            self.read_position,
            self.get_number_of_bytes_used(),
            self.get_number_of_bytes_allocated()
        )
    }
}

//endregion
