use serde::Serialize;

/// Liveness payload for `GET /health`, with the current size of each sequence.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub parents: usize,
    pub children: usize,
    pub admins: usize,
}
