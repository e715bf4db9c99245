use crate::{DecodeError, PhotonPacket};

/// Common trait for structures that are part of the pipeline result wire format.
pub trait PhotonSerializable: Sized {
    /// Returns the number of bytes this structure occupies on the wire
    fn get_number_of_bytes_needed(&self) -> usize;

    /// Appends the structure at the end of the packet
    fn try_serialize_into_packet(&self, packet: &mut PhotonPacket) -> Result<(), DecodeError>;

    /// Reads one structure starting at the packet cursor.
    ///
    /// On error the packet cursor position is unspecified, but no partially read
    /// structure is ever returned.
    fn try_deserialize_from_packet(packet: &mut PhotonPacket) -> Result<Self, DecodeError>;
}
