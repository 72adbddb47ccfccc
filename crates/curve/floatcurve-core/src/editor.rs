//! Editable point list and the edit operations applied to it.
//!
//! The editor grid works on its own list of keyframes, which may be out of time
//! order while the user types. A [`CurveDocument`] is built from it on demand.
//! Edits are plain [`EditOp`] values; applying one hands back the op that
//! reverses it, so a history stack can live entirely on the caller's side.

use serde::{Deserialize, Serialize};

use crate::config::{CurveConfig, NumberStyle};
use crate::document::CurveDocument;
use crate::error::CurveError;
use crate::keyframe::Keyframe;
use crate::text_format::{format_lines, parse_lines, ParsedLines};
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointList {
    points: Vec<Keyframe>,
}

impl PointList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Keyframe>,
    {
        Self {
            points: points.into_iter().collect(),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Keyframe] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append at the end; the list is not re-sorted.
    pub fn add(&mut self, key: Keyframe) -> usize {
        self.points.push(key);
        self.points.len() - 1
    }

    pub fn insert(&mut self, index: usize, key: Keyframe) -> Result<()> {
        let len = self.points.len();
        if index > len {
            return Err(CurveError::IndexOutOfRange { index, len });
        }
        self.points.insert(index, key);
        Ok(())
    }

    /// Replace the point at `index`, returning the previous one.
    pub fn update(&mut self, index: usize, key: Keyframe) -> Result<Keyframe> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(CurveError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, key))
    }

    pub fn remove(&mut self, index: usize) -> Result<Keyframe> {
        let len = self.points.len();
        if index >= len {
            return Err(CurveError::IndexOutOfRange { index, len });
        }
        Ok(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Stable sort by time; equal times keep their relative order.
    pub fn sort_by_time(&mut self) {
        self.points.sort_by(Keyframe::cmp_time);
    }

    pub fn load_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Keyframe>,
    {
        self.points = points.into_iter().collect();
    }

    /// Build a curve from the points (sorted, near duplicates collapsed);
    /// `None` for an empty list.
    pub fn to_curve(&self, config: CurveConfig) -> Option<CurveDocument> {
        if self.points.is_empty() {
            return None;
        }
        Some(CurveDocument::from_keyframes(
            config,
            self.points.iter().copied(),
        ))
    }

    /// Smooth through a curve and reload its (sorted) keys. An empty list stays empty.
    pub fn smooth_tangents(&mut self) -> Result<()> {
        let Some(mut curve) = self.to_curve(CurveConfig::default()) else {
            return Ok(());
        };
        curve.smooth_tangents()?;
        self.points = curve.keys().to_vec();
        Ok(())
    }

    /// Key lines in list order.
    pub fn serialize_to_text(&self, key_name: &str, style: NumberStyle) -> String {
        format_lines(&self.points, key_name, style)
    }

    /// Replace the list with the keys parsed from `text`. Blank text is ignored
    /// and leaves the list as it was.
    pub fn deserialize_from_text(&mut self, text: &str) -> ParsedLines {
        if text.trim().is_empty() {
            return ParsedLines::default();
        }
        let parsed = parse_lines(text);
        self.points = parsed.keys.clone();
        parsed
    }
}

/// A single edit to a [`PointList`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Add { key: Keyframe },
    Insert { index: usize, key: Keyframe },
    Update { index: usize, key: Keyframe },
    Remove { index: usize },
    Clear,
    Sort,
    Load { points: Vec<Keyframe> },
    LoadText { text: String },
    SmoothTangents,
}

impl EditOp {
    /// Short label for menus and history lists.
    pub fn label(&self) -> &'static str {
        match self {
            EditOp::Add { .. } => "Add Point",
            EditOp::Insert { .. } => "Insert Point",
            EditOp::Update { .. } => "Edit Point",
            EditOp::Remove { .. } => "Remove Point",
            EditOp::Clear => "Clear Points",
            EditOp::Sort => "Sort Points",
            EditOp::Load { .. } => "Load Points",
            EditOp::LoadText { .. } => "Paste Points",
            EditOp::SmoothTangents => "Smooth Tangents",
        }
    }

    /// Apply to `list` and return the op that undoes it. On error `list` is unchanged.
    pub fn apply(&self, list: &mut PointList) -> Result<EditOp> {
        match self {
            EditOp::Add { key } => {
                let index = list.add(*key);
                Ok(EditOp::Remove { index })
            }
            EditOp::Insert { index, key } => {
                list.insert(*index, *key)?;
                Ok(EditOp::Remove { index: *index })
            }
            EditOp::Update { index, key } => {
                let previous = list.update(*index, *key)?;
                Ok(EditOp::Update {
                    index: *index,
                    key: previous,
                })
            }
            EditOp::Remove { index } => {
                let key = list.remove(*index)?;
                Ok(EditOp::Insert { index: *index, key })
            }
            EditOp::Clear => Ok(snapshot_then(list, PointList::clear)),
            EditOp::Sort => Ok(snapshot_then(list, PointList::sort_by_time)),
            EditOp::Load { points } => Ok(snapshot_then(list, |l| {
                l.load_points(points.iter().copied())
            })),
            EditOp::LoadText { text } => Ok(snapshot_then(list, |l| {
                l.deserialize_from_text(text);
            })),
            EditOp::SmoothTangents => {
                let before = list.points.clone();
                list.smooth_tangents()?;
                Ok(EditOp::Load { points: before })
            }
        }
    }
}

fn snapshot_then(list: &mut PointList, edit: impl FnOnce(&mut PointList)) -> EditOp {
    let before = list.points.clone();
    edit(list);
    EditOp::Load { points: before }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(t: f32, v: f32) -> Keyframe {
        Keyframe::flat(t, v).unwrap()
    }

    #[test]
    fn list_keeps_user_order_until_sorted() {
        let mut list = PointList::new();
        list.add(k(5.0, 0.0));
        list.add(k(1.0, 0.0));
        list.add(k(3.0, 0.0));
        assert_eq!(list.points()[0].time(), 5.0);
        list.sort_by_time();
        let times: Vec<f32> = list.points().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn out_of_range_edits_fail_cleanly() {
        let mut list = PointList::from_points([k(0.0, 0.0)]);
        assert_eq!(
            list.update(1, k(1.0, 1.0)),
            Err(CurveError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(list.remove(3).is_err());
        assert!(list.insert(2, k(1.0, 1.0)).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn every_op_inverts() {
        let original = PointList::from_points([k(2.0, 1.0), k(0.0, 0.0), k(1.0, 3.0)]);
        let ops = [
            EditOp::Add { key: k(9.0, 9.0) },
            EditOp::Insert {
                index: 1,
                key: k(4.0, 4.0),
            },
            EditOp::Update {
                index: 2,
                key: k(1.5, 2.0),
            },
            EditOp::Remove { index: 0 },
            EditOp::Clear,
            EditOp::Sort,
            EditOp::Load {
                points: vec![k(7.0, 7.0)],
            },
            EditOp::LoadText {
                text: "key = 3 3\nkey = 4 4".into(),
            },
            EditOp::SmoothTangents,
        ];
        for op in ops {
            let mut list = original.clone();
            let inverse = op.apply(&mut list).unwrap();
            inverse.apply(&mut list).unwrap();
            assert_eq!(list, original, "{}", op.label());
        }
    }

    #[test]
    fn smoothing_sorts_and_sets_interior_tangents() {
        let mut list = PointList::from_points([k(2.0, 4.0), k(0.0, 0.0), k(1.0, 1.0)]);
        list.smooth_tangents().unwrap();
        let keys = list.points();
        assert_eq!(keys[0].time(), 0.0);
        assert_eq!(keys[1].in_tangent(), 1.0);
        assert_eq!(keys[1].out_tangent(), 1.0);
        assert_eq!(keys[2].in_tangent(), 0.0);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut list = PointList::from_points([k(0.0, 0.0)]);
        let parsed = list.deserialize_from_text("  \n ");
        assert!(parsed.keys.is_empty());
        assert_eq!(list.len(), 1);

        let parsed = list.deserialize_from_text("key = 1 1\nbad line");
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(list.points(), &[k(1.0, 1.0)]);
    }

    #[test]
    fn text_round_trip_in_list_order() {
        let list = PointList::from_points([k(2.0, 1.0), k(0.0, 0.5)]);
        let text = list.serialize_to_text("key", NumberStyle::Display);
        assert_eq!(text, "key = 2 1 0 0\nkey = 0 0.5 0 0");
        let mut back = PointList::new();
        back.deserialize_from_text(&text);
        assert_eq!(back, list);
    }

    #[test]
    fn empty_list_has_no_curve() {
        assert!(PointList::new().to_curve(CurveConfig::default()).is_none());
    }
}
