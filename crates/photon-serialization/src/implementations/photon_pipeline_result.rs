use crate::{DecodeError, PhotonPacket, PhotonSerializable, PhotonTrackedTarget};
use serde::{Deserialize, Serialize};

/// The decoded snapshot of one frame published by the coprocessor.
///
/// Targets are kept in wire order. The producer places its designated best target
/// first, so [`PhotonPipelineResult::get_best_target`] is the first element.
///
/// # Example
/// ```
/// use photon_serialization::PhotonPipelineResult;
///
/// let result = PhotonPipelineResult::new_empty();
/// assert!(!result.has_targets());
/// assert!(result.get_best_target().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotonPipelineResult {
    latency_millis: f64,
    targets: Vec<PhotonTrackedTarget>,
}

impl PhotonPipelineResult {
    /// latency f64 + target count u8
    pub const HEADER_BYTE_COUNT: usize = 9;

    /// The count field is a single byte
    pub const MAX_NUMBER_OF_TARGETS: usize = u8::MAX as usize;

    pub fn new(latency_millis: f64, targets: Vec<PhotonTrackedTarget>) -> Self {
        Self {
            latency_millis,
            targets,
        }
    }

    pub fn new_empty() -> Self {
        Self::default()
    }

    //region Get Properties

    /// Pipeline latency of this frame in milliseconds
    pub fn get_latency_millis(&self) -> f64 {
        self.latency_millis
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// The target the pipeline designated as primary, if any
    pub fn get_best_target(&self) -> Option<&PhotonTrackedTarget> {
        self.targets.first()
    }

    pub fn get_targets(&self) -> &[PhotonTrackedTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<PhotonTrackedTarget> {
        self.targets
    }

    //endregion

    //region Decoding

    /// Decodes a full frame from the start of the packet, allowing up to
    /// [`Self::MAX_NUMBER_OF_TARGETS`] targets.
    pub fn try_decode(packet: &mut PhotonPacket) -> Result<Self, DecodeError> {
        Self::try_decode_with_limit(packet, Self::MAX_NUMBER_OF_TARGETS)
    }

    /// Decodes a full frame, refusing frames that declare more than `max_targets`.
    ///
    /// An empty packet is what a table returns before anything was published, and
    /// decodes to an empty result. Any other packet shorter than its header or its
    /// declared records fails as a whole with [`DecodeError::Truncated`].
    ///
    /// # Example
    /// ```
    /// use photon_serialization::{DecodeError, PhotonPacket, PhotonPipelineResult};
    ///
    /// let mut packet = PhotonPacket::new_empty();
    /// assert!(!PhotonPipelineResult::try_decode(&mut packet).unwrap().has_targets());
    ///
    /// // Header says 1 target, no record follows
    /// let mut bytes = 20.0f64.to_be_bytes().to_vec();
    /// bytes.push(1);
    /// packet.write_data_by_copy_and_reset(&bytes);
    /// assert_eq!(
    ///     PhotonPipelineResult::try_decode(&mut packet),
    ///     Err(DecodeError::Truncated { needed: 65, available: 9 })
    /// );
    /// ```
    pub fn try_decode_with_limit(
        packet: &mut PhotonPacket,
        max_targets: usize,
    ) -> Result<Self, DecodeError> {
        if packet.is_empty() {
            return Ok(Self::new_empty());
        }

        let latency_millis = packet.decode_f64()?;
        let number_of_targets = packet.decode_u8()? as usize;
        if number_of_targets > max_targets {
            return Err(DecodeError::Malformed(format!(
                "Packet declares {} targets, but at most {} are accepted!",
                number_of_targets, max_targets
            )));
        }
        packet.verify_bytes_remaining(number_of_targets * PhotonTrackedTarget::BYTE_COUNT)?;

        let mut targets = Vec::with_capacity(number_of_targets);
        for _ in 0..number_of_targets {
            targets.push(PhotonTrackedTarget::try_deserialize_from_packet(packet)?);
        }
        // Anything after the declared records is ignored
        Ok(Self::new(latency_millis, targets))
    }

    //endregion

    //region Encoding

    /// Encodes the frame into a new byte vector, as the coprocessor would publish it.
    pub fn try_encode_to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let mut packet = PhotonPacket::with_capacity(self.get_number_of_bytes_needed());
        self.try_serialize_into_packet(&mut packet)?;
        Ok(packet.get_byte_ref().to_vec())
    }

    /// Overwrites the packet with the encoded frame, reusing its allocation.
    pub fn try_encode_into_packet(&self, packet: &mut PhotonPacket) -> Result<(), DecodeError> {
        packet.clear();
        packet.reserve_exact(self.get_number_of_bytes_needed());
        self.try_serialize_into_packet(packet)
    }

    //endregion
}

impl PhotonSerializable for PhotonPipelineResult {
    fn get_number_of_bytes_needed(&self) -> usize {
        Self::HEADER_BYTE_COUNT + self.targets.len() * PhotonTrackedTarget::BYTE_COUNT
    }

    fn try_serialize_into_packet(&self, packet: &mut PhotonPacket) -> Result<(), DecodeError> {
        if self.targets.len() > Self::MAX_NUMBER_OF_TARGETS {
            return Err(DecodeError::Malformed(format!(
                "Pipeline results support a max of {} targets, {} were given!",
                Self::MAX_NUMBER_OF_TARGETS,
                self.targets.len()
            )));
        }
        packet.encode_f64(self.latency_millis);
        packet.encode_u8(self.targets.len() as u8);
        for target in &self.targets {
            target.try_serialize_into_packet(packet)?;
        }
        Ok(())
    }

    fn try_deserialize_from_packet(packet: &mut PhotonPacket) -> Result<Self, DecodeError> {
        Self::try_decode(packet)
    }
}
