//! Reference model for insertion order.
//!
//! An insert into a cell store must leave the live values in the same order
//! as inserting into a plain `Vec` at the matching live position.

/// Plain ordered sequence of live values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceModel {
    values: Vec<i32>,
}

impl SequenceModel {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Insert `values` so the first lands at live position `position`.
    ///
    /// `reversed` mirrors a back-to-front range write.
    pub fn insert(&mut self, position: usize, values: &[i32], reversed: bool) {
        let position = position.min(self.values.len());
        let tail = self.values.split_off(position);
        if reversed {
            self.values.extend(values.iter().rev());
        } else {
            self.values.extend_from_slice(values);
        }
        self.values.extend(tail);
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_splices_at_position() {
        let mut m = SequenceModel::new(vec![10, 20, 30]);
        m.insert(1, &[99], false);
        assert_eq!(m.as_slice(), &[10, 99, 20, 30]);
        m.insert(9, &[1, 2], true);
        assert_eq!(m.as_slice(), &[10, 99, 20, 30, 2, 1]);
        assert_eq!(m.len(), 6);
    }
}
