use itertools::izip;

use crate::data::error::FetchError;
use crate::data::normalize::{HistoricalSnapshot, LiveSample};
use crate::domain::{Asset, PerAsset};

/// Labels plus one price series per asset, always the same length.
///
/// The presentation layer only ever gets `&SeriesStore`, and both mutations
/// build the new state fully before it becomes visible, so a reader never
/// sees two series updated and the third not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    labels: Vec<String>,
    samples: PerAsset<Vec<String>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self, asset: Asset) -> &[String] {
        &self.samples[asset]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn latest(&self, asset: Asset) -> Option<&str> {
        self.samples[asset].last().map(String::as_str)
    }

    /// Row-per-label view for the comparison table: `(label, [btc, eth, bnb])`.
    pub fn rows(&self) -> impl Iterator<Item = (&str, PerAsset<&str>)> {
        izip!(
            &self.labels,
            &self.samples.btc,
            &self.samples.eth,
            &self.samples.bnb
        )
        .map(|(label, btc, eth, bnb)| {
            (
                label.as_str(),
                PerAsset::new(btc.as_str(), eth.as_str(), bnb.as_str()),
            )
        })
    }

    /// Live merge: `seq' = (seq + [new]).suffix(capacity)` for the labels and every asset.
    pub fn append_with_eviction(&mut self, sample: LiveSample, capacity: usize) {
        let LiveSample { label, prices } = sample;

        push_bounded(&mut self.labels, label, capacity);
        for (asset, price) in prices {
            push_bounded(&mut self.samples[asset], price, capacity);
        }

        debug_assert!(self.is_aligned());
    }

    /// Historical merge: the snapshot wholly replaces the current contents,
    /// whatever its length. A snapshot whose series disagree is refused and
    /// the store is left as it was.
    pub fn replace_all(&mut self, snapshot: HistoricalSnapshot) -> Result<(), FetchError> {
        let expected = snapshot.labels.len();
        if let Some((asset, series)) = snapshot
            .prices
            .iter()
            .find(|(_, series)| series.len() != expected)
        {
            return Err(FetchError::Misaligned {
                asset,
                detail: format!("{} prices for {} labels", series.len(), expected),
            });
        }

        self.labels = snapshot.labels;
        self.samples = snapshot.prices;
        Ok(())
    }

    /// `len(labels) == len(samples[asset])` for every asset.
    pub fn is_aligned(&self) -> bool {
        self.samples
            .iter()
            .all(|(_, series)| series.len() == self.labels.len())
    }
}

fn push_bounded(seq: &mut Vec<String>, value: String, capacity: usize) {
    seq.push(value);
    if seq.len() > capacity {
        let excess = seq.len() - capacity;
        seq.drain(..excess);
    }
}
