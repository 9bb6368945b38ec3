#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueEvent(pub u64);
