// SPDX-License-Identifier: MIT

//! A candidate guarded by OR-of-AND condition groups
//!
//! Schematically a pickable is picked when
//! `(x AND y AND z) OR (a AND b) OR ...`, one parenthesized group per
//! `sufficientToPick` list.

use super::condition::Condition;
use super::context::LogicContext;
use super::messages::{self, localized, Localize};
use super::types::{ConditionReadout, PickableSpec};
use super::value::DataBag;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Pickable {
    groups: Vec<Vec<Condition>>,
    is_sole_pickable: bool,
}

impl Pickable {
    /// `is_sole_pickable` only affects readouts of criteria-less pickables.
    pub fn new(spec: &PickableSpec, default_key: Option<&str>, is_sole_pickable: bool) -> Result<Self> {
        Self::new_with_context(spec, default_key, is_sole_pickable, &LogicContext::default())
    }

    /// Like [`Pickable::new`], with every condition evaluating against `context`
    pub fn new_with_context(
        spec: &PickableSpec,
        default_key: Option<&str>,
        is_sole_pickable: bool,
        context: &LogicContext,
    ) -> Result<Self> {
        let groups = spec
            .pick_criteria
            .iter()
            .map(|criteria| {
                criteria
                    .sufficient_to_pick
                    .iter()
                    .map(|cond| Condition::new_with_context(cond, default_key, context.clone()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            groups,
            is_sole_pickable,
        })
    }

    pub fn is_sole_pickable(&self) -> bool {
        self.is_sole_pickable
    }

    /// True when some group has every condition true. No criteria means always.
    ///
    /// Evaluation errors propagate; they are never read as "not satisfied".
    pub fn do_data_satisfy_criteria(&self, data: &DataBag) -> Result<bool> {
        if self.groups.is_empty() {
            return Ok(true);
        }

        for group in &self.groups {
            if group_holds(group, data)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One readout per group, e.g.
    /// `[{IF, "city = NEW YORK & state = NY"}, {OR, "city = SAN FRANCISCO & state = CA"}]`
    pub fn readouts_for_pickable_with_localized(
        &self,
        localize: Option<Localize<'_>>,
    ) -> Vec<ConditionReadout> {
        if self.groups.is_empty() {
            return vec![if self.is_sole_pickable {
                ConditionReadout::new(localized(localize, messages::ALWAYS), "")
            } else {
                ConditionReadout::new(
                    localized(localize, messages::IF),
                    localized(localize, messages::NOT_PREVIOUSLY_DIVERTED),
                )
            }];
        }

        self.groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let conjunction = if i == 0 { messages::IF } else { messages::OR };
                let clauses: Vec<String> = group
                    .iter()
                    .map(|cond| cond.condition_string_with_localized(localize))
                    .collect();
                ConditionReadout::new(localized(localize, conjunction), clauses.join(" & "))
            })
            .collect()
    }
}

fn group_holds(group: &[Condition], data: &DataBag) -> Result<bool> {
    for cond in group {
        if !cond.is_true_for_data(data)? {
            return Ok(false);
        }
    }
    Ok(true)
}
