use crate::api::types::BodyId;
use crate::components::body::{Body, BodyDesc};
use crate::error::SimError;

/// Arena of bodies using a flat Vec, addressed by insertion index.
/// Designed for small body counts (tens, not thousands).
///
/// Insertion order is the draw order and the picking precedence.
/// Bodies are never removed one at a time; [`BodyStore::reset`] replaces
/// everything and bumps the epoch so old ids stop resolving.
#[derive(Debug, Clone)]
pub struct BodyStore {
    bodies: Vec<Body>,
    epoch: u32,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            epoch: 0,
        }
    }

    /// Append a body. Returns its id.
    pub fn add(&mut self, body: Body) -> BodyId {
        let id = BodyId {
            index: self.bodies.len() as u32,
            epoch: self.epoch,
        };
        self.bodies.push(body);
        id
    }

    /// Validate and build a body from its description, then append it.
    pub fn add_desc(&mut self, desc: BodyDesc) -> Result<BodyId, SimError> {
        let body = Body::from_desc(desc)?;
        Ok(self.add(body))
    }

    /// Replace the whole contents. Every description is validated first;
    /// on error the store is left untouched.
    pub fn reset(&mut self, seed: Vec<BodyDesc>) -> Result<(), SimError> {
        let bodies = seed
            .into_iter()
            .map(Body::from_desc)
            .collect::<Result<Vec<_>, _>>()?;
        self.bodies = bodies;
        self.epoch = self.epoch.wrapping_add(1);
        Ok(())
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        if id.epoch != self.epoch {
            return None;
        }
        self.bodies.get(id.index as usize)
    }

    /// Id of the body at `index` in insertion order.
    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        (index < self.bodies.len()).then(|| BodyId {
            index: index as u32,
            epoch: self.epoch,
        })
    }

    /// Iterate over bodies in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Iterate over `(id, body)` pairs in insertion order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (BodyId, &Body)> {
        let epoch = self.epoch;
        self.bodies.iter().enumerate().map(move |(i, b)| {
            (
                BodyId {
                    index: i as u32,
                    epoch,
                },
                b,
            )
        })
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// The first body inserted. The seed puts the central star here.
    pub fn primary(&self) -> Option<&Body> {
        self.bodies.first()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyStore {
    fn default() -> Self {
        Self::new()
    }
}
