use serde::{Serialize, Deserialize};

use std::borrow::Cow;

use crate::{
    BossParams,
    IndividualBoss,
    Result,
};
use super::admission::Scored;
use super::storage::MemberStore;


/// Where the model of a member lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum MemberModel {
    /// Kept in memory.
    Resident(IndividualBoss),
    /// Written to a [`MemberStore`] and dropped from memory.
    Persisted { id: usize },
}


/// A model admitted to the ensemble, with its LOOCV accuracy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleMember {
    id: usize,
    accuracy: f64,
    params: BossParams,
    model: MemberModel,
}


impl EnsembleMember {
    pub(crate) fn resident(id: usize, accuracy: f64, model: IndividualBoss)
        -> Self
    {
        let params = model.params();
        Self { id, accuracy, params, model: MemberModel::Resident(model) }
    }


    /// Drop the in-memory model.
    /// The caller must have persisted it under `self.id()`.
    pub(crate) fn unload(&mut self) {
        self.model = MemberModel::Persisted { id: self.id };
    }


    /// Returns the model, reading it from `store` if it was dropped.
    /// A reloaded model is owned by the returned value
    /// and freed once it goes out of scope.
    pub(crate) fn materialize(&self, store: &MemberStore)
        -> Result<Cow<'_, IndividualBoss>>
    {
        match &self.model {
            MemberModel::Resident(model) => Ok(Cow::Borrowed(model)),
            MemberModel::Persisted { id } => store.load(*id).map(Cow::Owned),
        }
    }


    /// Identifier of this member, unique within an ensemble.
    pub fn id(&self) -> usize {
        self.id
    }


    /// LOOCV accuracy of this member on the training set.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }


    /// Parameters of this member.
    pub fn params(&self) -> BossParams {
        self.params
    }


    /// Returns `true` if the model is held in memory.
    pub fn is_resident(&self) -> bool {
        matches!(self.model, MemberModel::Resident(_))
    }
}


impl Scored for EnsembleMember {
    fn accuracy(&self) -> f64 {
        self.accuracy
    }
}
