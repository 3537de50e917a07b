// SPDX-License-Identifier: MIT

//! Ranked first-match selection over candidate pickables

use super::context::LogicContext;
use super::messages::Localize;
use super::pickable::Pickable;
use super::types::{PickableReadout, PickableSet, PickableSpec};
use super::value::DataBag;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Picker {
    pickables: Vec<PickableSpec>,
    default_key: Option<String>,
    context: LogicContext,
}

impl Picker {
    /// Candidates are stably sorted by `logicRank` (missing = 0) when any
    /// candidate declares one; otherwise input order is kept.
    pub fn new(mut pickables: Vec<PickableSpec>, default_key: Option<&str>) -> Self {
        if pickables.iter().any(|p| p.logic_rank.is_some()) {
            pickables.sort_by_key(|p| p.logic_rank.unwrap_or(0));
        }
        Self {
            pickables,
            default_key: default_key.map(str::to_string),
            context: LogicContext::default(),
        }
    }

    pub fn from_set(set: PickableSet) -> Self {
        Self::new(set.pickables, set.default_key.as_deref())
    }

    pub fn with_context(mut self, context: LogicContext) -> Self {
        self.context = context;
        self
    }

    /// Candidates in evaluation order
    pub fn pickables(&self) -> &[PickableSpec] {
        &self.pickables
    }

    pub fn default_key(&self) -> Option<&str> {
        self.default_key.as_deref()
    }

    /// First non-excluded candidate whose criteria hold for `data`.
    ///
    /// `Ok(None)` means nothing matched. Any evaluation error aborts the
    /// whole selection.
    pub fn pick_for_data(
        &self,
        data: &DataBag,
        excluded_ids: Option<&[String]>,
    ) -> Result<Option<&PickableSpec>> {
        for spec in &self.pickables {
            if is_excluded(spec, excluded_ids) {
                log::debug!("Skipping excluded pickable {}", spec.id);
                continue;
            }

            let pickable = self.pickable_for(spec, true)?;
            if pickable.do_data_satisfy_criteria(data)? {
                log::debug!("Picked {}", spec.id);
                return Ok(Some(spec));
            }
            log::trace!("Pickable {} not satisfied", spec.id);
        }

        log::debug!("No pickable matched among {}", self.pickables.len());
        Ok(None)
    }

    /// Readouts for every candidate, in evaluation order.
    ///
    /// A criteria-less candidate among several renders as a fallback
    /// (`IF not previously diverted`) rather than `ALWAYS`.
    pub fn readouts_with_localized(
        &self,
        localize: Option<Localize<'_>>,
    ) -> Result<Vec<PickableReadout>> {
        let is_sole = self.pickables.len() <= 1;
        self.pickables
            .iter()
            .map(|spec| {
                let pickable = self.pickable_for(spec, is_sole)?;
                Ok(PickableReadout {
                    id: spec.id.clone(),
                    name: spec.name.clone(),
                    readouts: pickable.readouts_for_pickable_with_localized(localize),
                })
            })
            .collect()
    }

    fn pickable_for(&self, spec: &PickableSpec, is_sole_pickable: bool) -> Result<Pickable> {
        Pickable::new_with_context(
            spec,
            self.default_key.as_deref(),
            is_sole_pickable,
            &self.context,
        )
    }
}

fn is_excluded(spec: &PickableSpec, excluded_ids: Option<&[String]>) -> bool {
    match excluded_ids {
        Some(ids) if !spec.id.is_empty() => ids.iter().any(|id| *id == spec.id),
        _ => false,
    }
}
