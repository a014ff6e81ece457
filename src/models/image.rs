use crate::error::ConceptifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub index: usize,
    pub url: String,
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    /// File extension guessed from the leading magic bytes.
    pub fn extension(&self) -> &'static str {
        match self.bytes.as_slice() {
            [0x89, b'P', b'N', b'G', ..] => "png",
            [0xFF, 0xD8, 0xFF, ..] => "jpg",
            [b'G', b'I', b'F', b'8', ..] => "gif",
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
            _ => "bin",
        }
    }
}

#[derive(Debug)]
pub struct FetchFailure {
    pub index: usize,
    pub url: String,
    pub error: ConceptifyError,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(FetchedImage),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn index(&self) -> usize {
        match self {
            FetchOutcome::Fetched(image) => image.index,
            FetchOutcome::Failed(failure) => failure.index,
        }
    }
}

/// Per-URL results of a batch download, in the order the URLs were given.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn images(&self) -> impl Iterator<Item = &FetchedImage> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FetchOutcome::Fetched(image) => Some(image),
            FetchOutcome::Failed(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FetchOutcome::Failed(failure) => Some(failure),
            FetchOutcome::Fetched(_) => None,
        })
    }

    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures().map(|failure| failure.index).collect()
    }

    pub fn fetched_count(&self) -> usize {
        self.images().count()
    }

    pub fn any_fetched(&self) -> bool {
        self.images().next().is_some()
    }

    pub fn all_fetched(&self) -> bool {
        !self.outcomes.is_empty() && self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
