/// Failure to turn packet bytes into a pipeline result (or back).
///
/// # Examples
/// ```
/// use photon_serialization::{DecodeError, PhotonPacket};
///
/// let mut packet = PhotonPacket::new_empty();
/// packet.write_data_by_copy_and_reset(&[0u8; 3]);
/// assert_eq!(
///     packet.decode_f64(),
///     Err(DecodeError::Truncated { needed: 8, available: 3 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Packet ended before the declared header or records were complete
    #[error("Packet truncated: {needed} bytes needed but only {available} available")]
    Truncated { needed: usize, available: usize },
    /// Header is readable but describes something impossible
    #[error("Malformed packet: {0}")]
    Malformed(String),
}
