use resolock::{GraphModel, NodeRef};

/// Allocate one unit of `resource` to `process`
#[allow(dead_code)]
pub fn allocate(model: &mut GraphModel, resource: &str, process: &str) {
    model
        .connect(
            NodeRef::Resource(resource.to_string()),
            NodeRef::Process(process.to_string()),
        )
        .expect("allocation edge should be created");
}

/// Make `process` request one unit of `resource`
#[allow(dead_code)]
pub fn request(model: &mut GraphModel, process: &str, resource: &str) {
    model
        .connect(
            NodeRef::Process(process.to_string()),
            NodeRef::Resource(resource.to_string()),
        )
        .expect("request edge should be created");
}

/// Two processes each holding one single-instance resource and requesting
/// the other's: the minimal deadlock.
#[allow(dead_code)]
pub fn deadlocked_pair() -> GraphModel {
    let mut model = GraphModel::new();
    model.add_resource("R1", 1);
    model.add_resource("R2", 1);
    model.add_process("P1");
    model.add_process("P2");
    allocate(&mut model, "R1", "P1");
    allocate(&mut model, "R2", "P2");
    request(&mut model, "P1", "R2");
    request(&mut model, "P2", "R1");
    model
}

/// One process holding R1 and requesting R2, which still has a free unit.
#[allow(dead_code)]
pub fn safe_single() -> GraphModel {
    let mut model = GraphModel::new();
    model.add_resource("R1", 1);
    model.add_resource("R2", 1);
    model.add_process("P1");
    allocate(&mut model, "R1", "P1");
    request(&mut model, "P1", "R2");
    model
}

/// Ring of `n` processes: Pi holds Ri and requests R(i+1), wrapping around.
#[allow(dead_code)]
pub fn ring(n: usize) -> GraphModel {
    let mut model = GraphModel::new();
    for i in 1..=n {
        model.add_resource(format!("R{i}"), 1);
        model.add_process(format!("P{i}"));
    }
    for i in 1..=n {
        let next = i % n + 1;
        allocate(&mut model, &format!("R{i}"), &format!("P{i}"));
        request(&mut model, &format!("P{i}"), &format!("R{next}"));
    }
    model
}

/// Assert the reported cycle is real: for every consecutive pair (a, b),
/// wrapping around, `a` is blocked on some resource `b` holds.
#[allow(dead_code)]
pub fn assert_valid_cycle(model: &GraphModel, cycle: &[String]) {
    assert!(!cycle.is_empty(), "cycle must not be empty");
    for (index, a) in cycle.iter().enumerate() {
        let b = &cycle[(index + 1) % cycle.len()];
        let a = model.process(a).expect("cycle member should exist");
        let b = model.process(b).expect("cycle member should exist");
        assert!(
            a.requesting.iter().any(|r| b.allocated.contains(r)),
            "{} is not blocked on any resource held by {}",
            a.id,
            b.id
        );
    }
}
