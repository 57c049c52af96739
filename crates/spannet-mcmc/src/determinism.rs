use spannet_core::derive_substream_seed;

/// Derives the deterministic seed for the proposal drawn at an iteration.
pub fn move_seed(master_seed: u64, iteration: usize) -> u64 {
    derive_substream_seed(master_seed, iteration as u64)
}

/// Derives the deterministic seed for the acceptance draw at an iteration.
pub fn acceptance_seed(master_seed: u64, iteration: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0xACCE_55ED_ACCE_55ED, iteration as u64)
}
