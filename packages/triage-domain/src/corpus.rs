use crate::{Error, Result, ticket::Ticket};

/// The historical tickets paired 1:1 with their embedding vectors.
///
/// Order is not semantically meaningful but is preserved so index-based
/// masks stay aligned with the embeddings. A corpus is built once and held
/// read-only; refreshes swap in a whole new snapshot.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
	tickets: Vec<Ticket>,
	embeddings: Vec<Vec<f32>>,
	dimensions: usize,
}
impl Corpus {
	/// Pairs tickets with embeddings, erroring on a length mismatch and
	/// skipping records whose embedding dimension differs from the first
	/// record's.
	pub fn build(tickets: Vec<Ticket>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
		if tickets.len() != embeddings.len() {
			return Err(Error::LengthMismatch {
				tickets: tickets.len(),
				embeddings: embeddings.len(),
			});
		}

		let mut corpus = Self::default();

		for (ticket, embedding) in tickets.into_iter().zip(embeddings) {
			if embedding.is_empty() {
				return Err(Error::EmptyEmbedding { id: ticket.id });
			}
			if corpus.dimensions == 0 {
				corpus.dimensions = embedding.len();
			}
			if embedding.len() != corpus.dimensions {
				tracing::warn!(
					ticket_id = %ticket.id,
					expected = corpus.dimensions,
					actual = embedding.len(),
					"Skipping ticket with mismatched embedding dimensions.",
				);

				continue;
			}

			corpus.tickets.push(ticket);
			corpus.embeddings.push(embedding);
		}

		Ok(corpus)
	}

	pub fn len(&self) -> usize {
		self.tickets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tickets.is_empty()
	}

	pub fn dimensions(&self) -> usize {
		self.dimensions
	}

	pub fn ticket(&self, index: usize) -> &Ticket {
		&self.tickets[index]
	}

	pub fn embedding(&self, index: usize) -> &[f32] {
		&self.embeddings[index]
	}

	pub fn tickets(&self) -> &[Ticket] {
		&self.tickets
	}

	pub fn has_category(&self, category: &str) -> bool {
		self.tickets.iter().any(|ticket| ticket.category == category)
	}
}
