//! End-to-end scenarios: named specifications filtering a small population.

use muster::{
    ExprSpec, FnSpec, InMemoryStore, PredExpr, SpecExpression, SpecExpressionExt, SpecFunction,
    SpecFunctionExt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Person {
    name: String,
    identity: i64,
}

fn person(name: &str, identity: i64) -> Person {
    Person {
        name: name.into(),
        identity,
    }
}

fn population() -> Vec<Person> {
    vec![person("Bob", 1), person("Anna", 2), person("Jo", 3)]
}

/// Matches people by exact name.
struct NameIs(&'static str);

impl SpecExpression<Person> for NameIs {
    fn expression(&self) -> PredExpr<Person> {
        let name = self.0;
        PredExpr::new(move |p: &Person| p.name == name)
    }
}

/// Matches people by exact identity.
struct IdentityIs(i64);

impl SpecExpression<Person> for IdentityIs {
    fn expression(&self) -> PredExpr<Person> {
        let identity = self.0;
        PredExpr::new(move |p: &Person| p.identity == identity)
    }
}

/// A function-backed rule: the name is short.
struct ShortName;

impl SpecFunction<Person> for ShortName {
    fn function(&self) -> muster::PredFn<Person> {
        std::sync::Arc::new(|p: &Person| p.name.len() <= 3)
    }
}

#[test]
fn a_named_spec_filters_the_population() {
    let people = population();
    let matched = NameIs("Anna").filter(&people);

    assert_eq!(matched, vec![&person("Anna", 2)]);
}

#[test]
fn conjunction_of_two_named_specs() {
    let people = population();
    let spec = NameIs("Anna").and(&IdentityIs(2)).unwrap();

    assert_eq!(spec.filter_cloned(&people), vec![person("Anna", 2)]);
}

#[test]
fn conjunction_with_no_common_member_is_empty() {
    let people = population();
    let spec = NameIs("Anna").and(&IdentityIs(1)).unwrap();

    assert!(spec.filter(&people).is_empty());
}

#[test]
fn alternation_of_two_named_specs() {
    let people = population();
    let spec = NameIs("Anna").or(&IdentityIs(3)).unwrap();

    let matched = spec.filter_cloned(&people);
    assert_eq!(matched, vec![person("Anna", 2), person("Jo", 3)]);
}

#[test]
fn negation_of_a_named_spec() {
    let people = population();
    let matched = NameIs("Anna").negate().filter_cloned(&people);

    assert_eq!(matched, vec![person("Bob", 1), person("Jo", 3)]);
}

#[test]
fn mixing_flavors_degrades_to_a_function_backed_result() {
    let people = population();

    // Expression participant on the left, opaque callable on the right.
    let spec: FnSpec<Person> = IdentityIs(1).or_fn(&ShortName);
    let matched = spec.filter_cloned(&people);
    assert_eq!(matched, vec![person("Bob", 1), person("Jo", 3)]);

    // And the other way round.
    let spec = ShortName.and_expr(&IdentityIs(3));
    assert_eq!(spec.filter_cloned(&people), vec![person("Jo", 3)]);
}

#[test]
fn function_backed_specs_compose_among_themselves() {
    let people = population();
    let not_bob = FnSpec::new(|p: &Person| p.name != "Bob");

    let spec = ShortName.and(&not_bob);
    assert_eq!(spec.filter_cloned(&people), vec![person("Jo", 3)]);

    let spec = ShortName.negate();
    assert_eq!(spec.filter_cloned(&people), vec![person("Anna", 2)]);
}

#[test]
fn a_person_spec_transforms_into_an_employee_spec() {
    #[derive(Clone)]
    struct Employee {
        person: Person,
        department: &'static str,
    }

    let staff = vec![
        Employee {
            person: person("Anna", 2),
            department: "engineering",
        },
        Employee {
            person: person("Jo", 3),
            department: "design",
        },
    ];

    let spec: ExprSpec<Employee> = NameIs("Anna").transform(|e: &Employee| e.person.clone());
    let matched = spec.filter(&staff);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].department, "engineering");

    // Function-backed specifications transform too; the result stays
    // function-backed.
    let spec: FnSpec<Employee> = ShortName.transform(|e: &Employee| e.person.clone());
    let matched = spec.filter(&staff);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].department, "design");
}

#[test]
fn specs_query_an_in_memory_store() {
    let mut store = InMemoryStore::new();
    for p in population() {
        let identity = p.identity;
        store.add(identity, p);
    }

    let people: Vec<Person> = store.query::<Person>().cloned().collect();
    let spec = NameIs("Anna").or(&IdentityIs(3)).unwrap();

    let mut names: Vec<String> = spec
        .filter(&people)
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Anna", "Jo"]);
}

#[test]
fn collection_helpers_on_named_specs() {
    let people = population();

    assert_eq!(NameIs("Jo").find(&people), Some(&person("Jo", 3)));
    assert_eq!(NameIs("Nobody").find(&people), None);
    assert_eq!(ShortName.count(&people), 2);
    assert!(IdentityIs(2).any(&people));
    assert!(!IdentityIs(2).all(&people));
}
