use crate::Bucket;
use std::ops::Index;

/// Accumulated compressed sizes, one counter per [`Bucket`].
///
/// Iteration always follows [`Bucket::ALL`], which is also the order used in
/// reports and serialized output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BucketSizes([u64; Bucket::COUNT]);
impl BucketSizes {
    pub fn add(&mut self, bucket: Bucket, size: u64) {
        let slot = &mut self.0[bucket.index()];
        *slot = slot.saturating_add(size);
    }

    #[must_use]
    pub fn get(&self, bucket: Bucket) -> u64 {
        self.0[bucket.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::ALL.into_iter().map(|bucket| (bucket, self.get(bucket)))
    }

    /// Total of every bucket. Never larger than the archive itself, but
    /// usually smaller: headers and the central directory belong to no bucket.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, size| acc.saturating_add(*size))
    }
}
impl Index<Bucket> for BucketSizes {
    type Output = u64;
    fn index(&self, bucket: Bucket) -> &u64 {
        &self.0[bucket.index()]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BucketSizes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Bucket::COUNT))?;
        for (bucket, size) in self.iter() {
            map.serialize_entry(bucket.as_str(), &size)?;
        }
        map.end()
    }
}

/// The size breakdown of a single archive.
///
/// Built once by [`analyze`](crate::analyze), fully populated, and not
/// modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SizeRecord {
    /// File name of the archive.
    pub name: String,
    /// BLAKE3 hash of the archive's raw bytes, for spotting identical builds.
    pub hash: String,
    /// Compressed entry sizes per component.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub buckets: BucketSizes,
    /// Size of the archive file on disk.
    pub total: u64,
    /// Size of the archive after another layer of gzip.
    pub download: u64,
}
