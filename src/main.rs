use std::collections::BTreeSet;

use action_model::{
    create_lifted, Action, ExportOptions, Fluent, LiftedAction, LiftedFluent, Model,
    ObjectType, Parameter, ParameterBoundFluent, Result,
};

fn blocks_world() -> Result<Model> {
    let block = ObjectType::new("block", None)?;
    let x = Parameter::new("x", Some(block.clone()));
    let y = Parameter::new("y", Some(block.clone()));

    let mut fluents = BTreeSet::new();
    fluents.insert(Fluent::from(LiftedFluent::new("on", vec![x.clone(), y.clone()])));
    fluents.insert(Fluent::from(LiftedFluent::new("clear", vec![x.clone()])));

    let mut actions = BTreeSet::new();
    actions.insert(Action::from(LiftedAction::new("move", vec![x, y])
        .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![0]))
        .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![1]))
        .with_negative_precondition(ParameterBoundFluent::positional("on", vec![0, 1]))
        .with_add_effect(ParameterBoundFluent::positional("on", vec![0, 1]))
        .with_delete_effect(ParameterBoundFluent::positional("clear", vec![1]))));

    create_lifted(fluents, actions, Some(vec![block]))
}

fn main() {
    env_logger::init();

    let model = match blocks_world() {
        Ok(model) => model,
        Err(e) => {eprintln!("{}", e); std::process::exit(1)},
    };
    print!("{}", model);

    let options = ExportOptions::new("blocks");
    match model.to_pddl(&options) {
        Ok(()) => println!("Wrote {} and {}", options.domain_file().display(), options.problem_file().display()),
        Err(e) => {eprintln!("{}", e); std::process::exit(1)},
    }
}
