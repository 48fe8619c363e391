pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Corpus has {tickets} tickets but {embeddings} embeddings.")]
	LengthMismatch { tickets: usize, embeddings: usize },
	#[error("Ticket {id} has an empty embedding.")]
	EmptyEmbedding { id: String },
}
