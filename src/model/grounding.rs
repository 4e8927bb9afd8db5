use std::collections::BTreeSet;

use log::debug;

use crate::error::{Error, Result};
use super::{
    action::{Action, GroundedAction, LiftedAction},
    fluent::{Fluent, GroundedFluent, ParameterBoundFluent},
    aggregate::{create_grounded, Model},
    symbol::{Parameter, PlanningObject},
};

/// Every assignment of `objects` to `params` that respects parameter types.
fn assignments(params: &[Parameter], objects: &[PlanningObject]) -> Vec<Vec<PlanningObject>> {
    params.iter().fold(vec![Vec::new()], |acc, param| {
        let candidates: Vec<&PlanningObject> = objects.iter()
            .filter(|o| o.object_type.is_subtype_of(&param.object_type))
            .collect();
        acc.into_iter().flat_map(|prefix| {
            candidates.iter().map(move |o| {
                let mut next = prefix.clone();
                next.push((*o).clone());
                next
            })
        }).collect()
    })
}

fn ground_set(
    fluents: &BTreeSet<ParameterBoundFluent>,
    params: &[Parameter],
    objects: &[PlanningObject],
) -> Result<BTreeSet<GroundedFluent>> {
    fluents.iter().map(|f| f.ground(params, objects)).collect()
}

fn ground_action(action: &LiftedAction, objects: Vec<PlanningObject>) -> Result<GroundedAction> {
    let params = &action.parameters;
    let mut grounded = GroundedAction::new(&action.name, Vec::new(), true, None);
    grounded.positive_preconditions = ground_set(&action.positive_preconditions, params, &objects)?;
    grounded.negative_preconditions = ground_set(&action.negative_preconditions, params, &objects)?;
    grounded.add_effects = ground_set(&action.add_effects, params, &objects)?;
    grounded.delete_effects = ground_set(&action.delete_effects, params, &objects)?;
    grounded.objects = objects;
    Ok(grounded)
}

/// Instantiates every fluent and action of a lifted model over `objects`.
/// An object may fill a parameter when its type is the parameter's type or
/// one of its descendants.
pub fn ground_model(model: &Model, objects: &[PlanningObject]) -> Result<Model> {
    if !model.is_lifted() {
        return Err(Error::ModelValidation(format!("Can only ground lifted models, got {}", model.kind())));
    }
    let mut fluents = BTreeSet::new();
    for fluent in model.fluents.iter().filter_map(Fluent::as_lifted) {
        for binding in assignments(&fluent.parameters, objects) {
            fluents.insert(Fluent::from(GroundedFluent::new(&fluent.name, binding)));
        }
    }
    let mut actions = BTreeSet::new();
    for action in model.actions.iter().filter_map(Action::as_lifted) {
        for binding in assignments(&action.parameters, objects) {
            actions.insert(Action::from(ground_action(action, binding)?));
        }
    }
    debug!("Grounded {} objects into {} fluents and {} actions", objects.len(), fluents.len(), actions.len());
    create_grounded(fluents, actions, model.learned_sorts.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{aggregate::create_lifted, fluent::LiftedFluent, object_type::ObjectType};

    #[test]
    fn test_ground_blocks() {
        let block = ObjectType::new("block", None).unwrap();
        let robot = ObjectType::new("robot", None).unwrap();
        let fluents = vec![Fluent::from(LiftedFluent::new("clear", vec![Parameter::new("x", Some(block.clone()))]))]
            .into_iter().collect();
        let actions = vec![Action::from(
            LiftedAction::new("stack", vec![Parameter::new("a", Some(block.clone())), Parameter::new("b", Some(block.clone()))])
                .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![1]))
                .with_add_effect(ParameterBoundFluent::named("on", &["a", "b"]))
                .with_delete_effect(ParameterBoundFluent::positional("clear", vec![1]))
        )].into_iter().collect();
        let model = create_lifted(fluents, actions, None).unwrap();
        let objects = vec![
            PlanningObject::new("a", block.clone()),
            PlanningObject::new("b", block),
            PlanningObject::new("r", robot),
        ];
        let grounded = ground_model(&model, &objects).unwrap();
        assert!(grounded.is_grounded());
        assert_eq!(grounded.fluents.len(), 2);
        assert_eq!(grounded.actions.len(), 4);
        let stack_ab = grounded.actions.iter().filter_map(Action::as_grounded)
            .find(|a| a.objects.iter().map(|o| o.name.as_str()).collect::<Vec<_>>() == ["a", "b"])
            .unwrap();
        assert_eq!(stack_ab.positive_preconditions.iter().next().unwrap().to_string(), "(clear b)");
        assert_eq!(stack_ab.add_effects.iter().next().unwrap().to_string(), "(on a b)");
        assert!(stack_ab.is_strips);
    }

    #[test]
    fn test_subtypes_fill_parents() {
        let vehicle = ObjectType::new("vehicle", None).unwrap();
        let truck = ObjectType::new("truck", Some(vehicle.clone())).unwrap();
        let params = vec![Parameter::new("v", Some(vehicle.clone()))];
        let objects = vec![PlanningObject::new("t1", truck.clone()), PlanningObject::new("v1", vehicle)];
        assert_eq!(assignments(&params, &objects).len(), 2);
        let params = vec![Parameter::new("t", Some(truck))];
        assert_eq!(assignments(&params, &objects).len(), 1);
        assert_eq!(assignments(&[], &objects), vec![Vec::<PlanningObject>::new()]);
    }

    #[test]
    fn test_ground_requires_lifted() {
        let empty = Model::new(BTreeSet::new(), BTreeSet::new(), None, None).unwrap();
        assert!(matches!(ground_model(&empty, &[]), Err(Error::ModelValidation(_))));
    }
}
