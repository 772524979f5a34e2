use crate::*;

use crate::fenwick::Fenwick;

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Node {
    Header(u32),
    Item(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Entry {
    Header(u32),
    Item(u32),
}

#[derive(Debug)]
struct TestHolder {
    node: Node,
    bound: Option<Address>,
    binds: usize,
}

impl Holder for TestHolder {
    type Node = Node;

    fn node(&self) -> Node {
        self.node
    }
}

/// Sections are `(name, item values)`; every node gets a label describing what it shows.
#[derive(Debug, Default)]
struct TestAdapter {
    sections: Vec<(u32, Vec<u32>)>,
    labels: HashMap<Node, Entry>,
    next_id: u32,
    header_for_single_section: bool,
    no_headers: bool,
    reuse_item_node: bool,
    grow_on_bind: bool,
    header_calls: usize,
}

impl TestAdapter {
    fn with_sections(sections: &[&[u32]]) -> Self {
        Self {
            sections: sections
                .iter()
                .enumerate()
                .map(|(name, items)| (name as u32, items.to_vec()))
                .collect(),
            ..Self::default()
        }
    }

    fn expected(&self) -> Vec<Entry> {
        let headers = self.sections.len() > 1;
        let mut out = Vec::new();
        for (name, items) in &self.sections {
            if headers {
                out.push(Entry::Header(*name));
            }
            out.extend(items.iter().map(|&v| Entry::Item(v)));
        }
        out
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Adapter for TestAdapter {
    type Node = Node;
    type Holder = TestHolder;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections[section].1.len()
    }

    fn header(&mut self, section: usize) -> Option<Node> {
        self.header_calls += 1;
        if self.no_headers || (self.sections.len() <= 1 && !self.header_for_single_section) {
            return None;
        }
        let node = Node::Header(self.fresh_id());
        let name = self.sections[section].0;
        self.labels.insert(node, Entry::Header(name));
        Some(node)
    }

    fn create_holder(&mut self) -> TestHolder {
        let id = if self.reuse_item_node {
            1
        } else {
            self.fresh_id()
        };
        TestHolder {
            node: Node::Item(id),
            bound: None,
            binds: 0,
        }
    }

    fn bind(&mut self, holder: &mut TestHolder, section: usize, index: usize) {
        let value = self.sections[section].1[index];
        holder.bound = Some(Address::new(section, index));
        holder.binds += 1;
        self.labels.insert(holder.node, Entry::Item(value));
        if self.grow_on_bind {
            self.sections[section].1.push(0);
        }
    }
}

type List = ListController<TestAdapter>;

fn loaded(sections: &[&[u32]]) -> List {
    let mut list = ListController::new(TestAdapter::with_sections(sections), ListOptions::new());
    list.reload().unwrap();
    list
}

fn entries<S: RenderSurface<Node>>(list: &ListController<TestAdapter, S>) -> Vec<Entry> {
    list.flat()
        .iter()
        .map(|n| list.adapter().labels[&n])
        .collect()
}

/// Checks order, header visibility, and pool/sequence parity against the model.
fn assert_consistent<S: RenderSurface<Node>>(list: &ListController<TestAdapter, S>) {
    let adapter = list.adapter();
    assert_eq!(entries(list), adapter.expected());
    assert_eq!(list.headers_visible(), adapter.sections.len() > 1);
    assert_eq!(list.section_count(), adapter.sections.len());

    let header = usize::from(list.headers_visible());
    let parity: usize = adapter.sections.iter().map(|(_, v)| v.len() + header).sum();
    assert_eq!(list.flat().len(), parity);

    for (s, (_, items)) in adapter.sections.iter().enumerate() {
        assert_eq!(list.item_count(s), Some(items.len()));
        assert_eq!(list.header_position(s).is_some(), list.headers_visible());
        for (j, &value) in items.iter().enumerate() {
            let holder = list.holder(s, j).unwrap();
            assert_eq!(adapter.labels[&holder.node], Entry::Item(value));
            let position = list.flat_position(s, j).unwrap();
            assert_eq!(list.flat().get(position), Some(holder.node));
        }
    }

    let state = list.snapshot();
    assert_eq!(state.flat_len, list.flat().len());
    assert_eq!(
        state.item_total() + state.sections.iter().filter(|s| s.has_header).count(),
        state.flat_len
    );
}

#[test]
fn scenario_single_section_has_no_header() {
    let mut list = ListController::new(TestAdapter::default(), ListOptions::new());

    list.adapter_mut().sections.push((0, Vec::new()));
    list.insert_sections(0, 1).unwrap();
    list.adapter_mut().sections[0].1.extend([1, 2, 3]);
    list.insert_items(0, 0, 3).unwrap();

    assert_eq!(
        entries(&list),
        [Entry::Item(1), Entry::Item(2), Entry::Item(3)]
    );
    assert!(!list.headers_visible());
    assert_consistent(&list);
}

#[test]
fn scenario_second_section_shows_headers_and_empty_sections_keep_them() {
    let mut list = ListController::new(TestAdapter::default(), ListOptions::new());
    list.adapter_mut().sections.push((0, alloc::vec![1, 2, 3]));
    list.insert_sections(0, 1).unwrap();

    list.adapter_mut().sections.push((1, Vec::new()));
    list.insert_sections(1, 1).unwrap();
    list.adapter_mut().sections[1].1.extend([10, 11]);
    list.insert_items(1, 0, 2).unwrap();
    assert_eq!(
        entries(&list),
        [
            Entry::Header(0),
            Entry::Item(1),
            Entry::Item(2),
            Entry::Item(3),
            Entry::Header(1),
            Entry::Item(10),
            Entry::Item(11),
        ]
    );
    assert_consistent(&list);

    list.adapter_mut().sections[0].1.clear();
    list.remove_items(0, 0, 3).unwrap();
    assert_eq!(
        entries(&list),
        [
            Entry::Header(0),
            Entry::Header(1),
            Entry::Item(10),
            Entry::Item(11),
        ]
    );
    assert_consistent(&list);

    list.adapter_mut().sections.remove(1);
    list.remove_sections(1, 1).unwrap();
    assert!(list.flat().is_empty());
    assert!(!list.headers_visible());
    assert_consistent(&list);
}

#[test]
fn scenario_change_section_drops_surplus_holders_only() {
    let mut list = loaded(&[&[1, 2], &[3, 4]]);
    let section_one = [
        list.holder(1, 0).unwrap().node,
        list.holder(1, 1).unwrap().node,
    ];
    let kept = list.holder(0, 0).unwrap().node;

    list.adapter_mut().sections[0].1.truncate(1);
    list.change_sections(0, 1).unwrap();

    assert_consistent(&list);
    assert_eq!(list.item_count(0), Some(1));
    assert_eq!(list.holder(0, 0).unwrap().node, kept);
    assert_eq!(list.holder(0, 0).unwrap().binds, 2);
    assert_eq!(list.holder(1, 0).unwrap().node, section_one[0]);
    assert_eq!(list.holder(1, 1).unwrap().node, section_one[1]);
    assert_eq!(list.holder(1, 0).unwrap().binds, 1);
}

#[test]
fn change_section_appends_new_items_after_existing_ones() {
    let mut list = loaded(&[&[1], &[2], &[3]]);
    list.adapter_mut().sections[1].1 = alloc::vec![20, 21, 22];
    list.change_section(1).unwrap();
    assert_consistent(&list);

    list.adapter_mut().sections[2].1.clear();
    list.change_section(2).unwrap();
    assert_consistent(&list);

    // Refill an empty section: new items land right after its header.
    list.adapter_mut().sections[2].1 = alloc::vec![30, 31];
    list.change_section(2).unwrap();
    assert_consistent(&list);
}

#[test]
fn change_sections_reconciles_a_range_while_headers_toggle() {
    let seen = Arc::new(Mutex::new(Vec::<ChangeSet>::new()));
    let sink = Arc::clone(&seen);
    let options = ListOptions::new().with_on_change(Some(move |c: &ChangeSet| {
        sink.lock().unwrap().push(*c);
    }));
    let mut list = ListController::new(TestAdapter::with_sections(&[&[1, 2]]), options);
    list.reload().unwrap();
    let kept = list.holder(0, 0).unwrap().node;

    list.adapter_mut().sections[0].1 = alloc::vec![5];
    list.adapter_mut().sections.push((1, alloc::vec![6, 7]));
    list.batch_update(|list| {
        list.insert_section(1).unwrap();
        list.change_sections(0, 2).unwrap();
    });

    assert_consistent(&list);
    assert_eq!(
        entries(&list),
        [
            Entry::Header(0),
            Entry::Item(5),
            Entry::Header(1),
            Entry::Item(6),
            Entry::Item(7),
        ]
    );
    assert_eq!(list.holder(0, 0).unwrap().node, kept);
    {
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[1],
            ChangeSet {
                inserted: 6,
                removed: 3,
                rebound: 3,
                headers_shown: true,
                headers_hidden: false,
                reloaded: false,
            }
        );
    }

    // Drop back to one section and refill it in the same batch.
    list.adapter_mut().sections.truncate(1);
    list.adapter_mut().sections[0].1 = alloc::vec![8, 9];
    list.batch_update(|list| {
        list.remove_sections(1, 1).unwrap();
        list.change_sections(0, 1).unwrap();
    });

    assert_consistent(&list);
    assert_eq!(entries(&list), [Entry::Item(8), Entry::Item(9)]);
    assert_eq!(list.holder(0, 0).unwrap().node, kept);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen[2].headers_hidden);
    assert!(!seen[2].headers_shown);
}

#[test]
fn change_items_rebinds_in_place() {
    let mut list = loaded(&[&[1, 2, 3]]);
    let before: Vec<Node> = list.flat().iter().collect();

    list.adapter_mut().sections[0].1[1] = 42;
    list.change_items(0, 1, 1).unwrap();

    assert_eq!(list.flat().as_slice(), before.as_slice());
    assert_eq!(entries(&list)[1], Entry::Item(42));
    assert_eq!(list.holder(0, 1).unwrap().binds, 2);
    assert_eq!(list.holder(0, 0).unwrap().binds, 1);
}

#[test]
fn insert_items_in_the_middle_and_front_of_sections() {
    let mut list = loaded(&[&[1, 2], &[], &[5]]);

    list.adapter_mut().sections[0].1.insert(1, 9);
    list.insert_item(0, 1).unwrap();
    assert_consistent(&list);

    list.adapter_mut().sections[2].1.splice(0..0, [7, 8]);
    list.insert_items(2, 0, 2).unwrap();
    assert_consistent(&list);

    // Empty middle section: anchor is the last item of section 0, plus two header slots.
    list.adapter_mut().sections[1].1.extend([3, 4]);
    list.insert_items(1, 0, 2).unwrap();
    assert_consistent(&list);
}

#[test]
fn insert_into_empty_leading_sections_counts_every_header() {
    let mut list = loaded(&[&[], &[], &[]]);
    assert_eq!(list.flat().len(), 3);

    list.adapter_mut().sections[2].1.push(1);
    list.insert_item(2, 0).unwrap();
    assert_eq!(list.flat_position(2, 0).unwrap(), 3);
    assert_consistent(&list);

    list.adapter_mut().sections[0].1.push(0);
    list.insert_item(0, 0).unwrap();
    assert_eq!(list.flat_position(0, 0).unwrap(), 1);
    assert_consistent(&list);
}

#[test]
fn showing_headers_places_them_before_each_section() {
    let mut list = loaded(&[&[], &[1, 2]]);
    list.adapter_mut().sections.truncate(1);
    list.remove_section(1).unwrap();
    assert_consistent(&list);

    list.adapter_mut().sections[0].1.push(7);
    list.insert_item(0, 0).unwrap();

    // Three new sections in the middle and at the end flip headers back on.
    list.adapter_mut().sections.insert(0, (10, Vec::new()));
    list.adapter_mut().sections.push((11, alloc::vec![8, 9]));
    list.adapter_mut().sections.push((12, Vec::new()));
    list.insert_section(0).unwrap();
    list.insert_sections(2, 2).unwrap();
    assert!(list.headers_visible());
    assert_consistent(&list);
}

#[test]
fn removing_sections_down_to_one_hides_headers_without_touching_items() {
    let mut list = loaded(&[&[1, 2], &[3], &[4]]);
    let items: Vec<Node> = (0..2).map(|j| list.holder(0, j).unwrap().node).collect();

    list.adapter_mut().sections.truncate(1);
    list.remove_sections(1, 2).unwrap();

    assert_eq!(list.flat().as_slice(), items.as_slice());
    assert_consistent(&list);
}

#[test]
fn insert_then_remove_restores_node_identities() {
    let mut list = loaded(&[&[1, 2], &[], &[3]]);
    for (section, item) in [(0, 0), (0, 2), (1, 0), (2, 1)] {
        let before: Vec<Node> = list.flat().iter().collect();

        list.adapter_mut().sections[section].1.insert(item, 99);
        list.insert_item(section, item).unwrap();
        list.adapter_mut().sections[section].1.remove(item);
        list.remove_item(section, item).unwrap();

        assert_eq!(list.flat().as_slice(), before.as_slice());
        assert_consistent(&list);
    }
}

#[test]
fn reload_twice_is_idempotent() {
    let mut list = loaded(&[&[1, 2], &[], &[3, 4, 5]]);
    let first = entries(&list);
    list.reload().unwrap();
    assert_eq!(entries(&list), first);
    assert_consistent(&list);
}

#[test]
fn set_adapter_reloads() {
    let mut list = loaded(&[&[1]]);
    let old = list
        .set_adapter(TestAdapter::with_sections(&[&[5], &[6, 7]]))
        .unwrap();
    assert_eq!(old.sections.len(), 1);
    assert_consistent(&list);
}

#[test]
fn reverse_lookups_find_owning_section() {
    let list = loaded(&[&[1], &[2, 3]]);
    let header = list.flat().get(2).unwrap();
    let item = list.holder(1, 1).unwrap().node;

    assert_eq!(list.section_of(header), Some(1));
    assert_eq!(list.section_of(item), Some(1));
    assert_eq!(list.address_of(item), Some(Address::new(1, 1)));
    assert_eq!(list.address_of(header), None);
    assert_eq!(list.section_of(Node::Item(10_000)), None);
    assert_eq!(list.header_position(1), Some(2));
}

#[test]
fn zero_count_notifications_change_nothing() {
    let mut list = loaded(&[&[1], &[2]]);
    let before: Vec<Node> = list.flat().iter().collect();
    list.insert_items(0, 1, 0).unwrap();
    list.remove_items(1, 0, 0).unwrap();
    list.change_items(0, 0, 0).unwrap();
    list.insert_sections(2, 0).unwrap();
    list.remove_sections(0, 0).unwrap();
    assert_eq!(list.flat().as_slice(), before.as_slice());
}

#[test]
fn invalid_addresses_are_rejected_before_any_mutation() {
    let mut list = loaded(&[&[1, 2]]);
    let before: Vec<Node> = list.flat().iter().collect();

    assert_eq!(
        list.change_items(0, 1, 2),
        Err(ListError::InvalidAddress {
            section: 0,
            item: 3
        })
    );
    assert_eq!(
        list.insert_items(1, 0, 1),
        Err(ListError::InvalidAddress {
            section: 1,
            item: 0
        })
    );
    assert!(matches!(
        list.insert_items(0, 3, 1),
        Err(ListError::InvalidAddress { .. })
    ));
    assert!(matches!(
        list.remove_items(0, 2, 1),
        Err(ListError::InvalidAddress { .. })
    ));
    assert!(matches!(
        list.remove_sections(0, 2),
        Err(ListError::InvalidAddress { .. })
    ));
    assert!(matches!(
        list.insert_sections(2, 1),
        Err(ListError::InvalidAddress { .. })
    ));
    assert!(matches!(
        list.change_sections(1, 1),
        Err(ListError::InvalidAddress { .. })
    ));
    assert!(matches!(
        list.flat_position(0, 2),
        Err(ListError::InvalidAddress { .. })
    ));
    assert_eq!(
        list.insert_items(0, 1, usize::MAX),
        Err(ListError::InvalidAddress {
            section: 0,
            item: 1
        })
    );
    assert_eq!(
        list.insert_sections(1, usize::MAX),
        Err(ListError::InvalidAddress {
            section: 1,
            item: 0
        })
    );

    assert_eq!(list.flat().as_slice(), before.as_slice());
    assert_consistent(&list);
}

#[test]
fn missing_header_is_a_contract_violation() {
    let mut adapter = TestAdapter::with_sections(&[&[1], &[2]]);
    adapter.no_headers = true;
    let mut list = ListController::new(adapter, ListOptions::new());
    assert_eq!(
        list.reload(),
        Err(ListError::AdapterContract(
            ContractViolation::MissingHeader { section: 0 }
        ))
    );
}

#[test]
fn strict_mode_rejects_header_for_single_section() {
    let mut adapter = TestAdapter::with_sections(&[&[1]]);
    adapter.header_for_single_section = true;

    let mut relaxed = ListController::new(adapter, ListOptions::new());
    relaxed.reload().unwrap();
    assert_eq!(relaxed.adapter().header_calls, 0);

    let (adapter, ()) = relaxed.into_parts();
    let mut strict = ListController::new(adapter, ListOptions::new().with_strict(true));
    assert_eq!(
        strict.reload(),
        Err(ListError::AdapterContract(
            ContractViolation::UnexpectedHeader { section: 0 }
        ))
    );
}

#[test]
fn strict_mode_accepts_sections_reported_one_at_a_time() {
    let adapter = TestAdapter::with_sections(&[&[1], &[2, 3]]);
    let mut list = ListController::new(adapter, ListOptions::new().with_strict(true));

    list.insert_section(0).unwrap();
    assert!(!list.headers_visible());
    list.insert_section(1).unwrap();
    assert!(list.headers_visible());
    assert_consistent(&list);
}

#[test]
fn strict_mode_rejects_duplicate_nodes() {
    let mut adapter = TestAdapter::with_sections(&[&[1, 2]]);
    adapter.reuse_item_node = true;
    let mut list = ListController::new(adapter, ListOptions::new().with_strict(true));
    assert_eq!(
        list.reload(),
        Err(ListError::AdapterContract(ContractViolation::DuplicateNode))
    );
}

#[test]
fn strict_mode_detects_counts_moving_during_an_operation() {
    let mut adapter = TestAdapter::with_sections(&[&[1]]);
    adapter.grow_on_bind = true;
    let mut list = ListController::new(adapter, ListOptions::new().with_strict(true));
    assert_eq!(
        list.reload(),
        Err(ListError::AdapterContract(
            ContractViolation::ItemCountChanged {
                section: 0,
                before: 1,
                after: 2
            }
        ))
    );
}

#[test]
fn on_change_fires_once_per_call_and_once_per_batch() {
    let seen = Arc::new(Mutex::new(Vec::<ChangeSet>::new()));
    let sink = Arc::clone(&seen);
    let options = ListOptions::new().with_on_change(Some(move |c: &ChangeSet| {
        sink.lock().unwrap().push(*c);
    }));
    let mut list = ListController::new(TestAdapter::with_sections(&[&[1, 2]]), options);

    list.reload().unwrap();
    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].reloaded);
        assert_eq!(seen[0].inserted, 2);
    }

    list.adapter_mut().sections.push((1, alloc::vec![3]));
    list.adapter_mut().sections[0].1.push(4);
    list.batch_update(|list| {
        list.insert_item(0, 2).unwrap();
        list.insert_section(1).unwrap();
        list.change_item(0, 0).unwrap();
    });

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[1],
        ChangeSet {
            inserted: 4,
            removed: 0,
            rebound: 1,
            headers_shown: true,
            headers_hidden: false,
            reloaded: false,
        }
    );
}

#[test]
fn on_change_is_skipped_for_no_op_calls() {
    let calls = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&calls);
    let mut list = ListController::new(
        TestAdapter::with_sections(&[&[1]]),
        ListOptions::new().with_on_change(Some(move |_: &ChangeSet| {
            *sink.lock().unwrap() += 1;
        })),
    );
    list.insert_sections(0, 0).unwrap();
    assert_eq!(*calls.lock().unwrap(), 0);

    list.update_options(|o| o.on_change = None);
    list.reload().unwrap();
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[derive(Debug, Default)]
struct MirrorSurface {
    nodes: Vec<Node>,
    calls: usize,
}

impl RenderSurface<Node> for MirrorSurface {
    fn attach(&mut self, node: Node, at: AttachPoint<Node>) {
        self.calls += 1;
        let position = match at {
            AttachPoint::Start => 0,
            AttachPoint::After(prev) => self.nodes.iter().position(|&n| n == prev).unwrap() + 1,
        };
        self.nodes.insert(position, node);
    }

    fn detach(&mut self, node: Node) {
        self.calls += 1;
        let position = self.nodes.iter().position(|&n| n == node).unwrap();
        self.nodes.remove(position);
    }
}

#[test]
fn flat_sequence_positional_contract() {
    let mut flat = FlatSequence::with_surface(MirrorSurface::default());
    flat.append(Node::Item(1));
    flat.insert_at(Node::Item(2), 1).unwrap();
    flat.insert_at(Node::Item(0), 0).unwrap();
    assert_eq!(
        flat.as_slice(),
        [Node::Item(0), Node::Item(1), Node::Item(2)]
    );
    assert_eq!(flat.index_of(Node::Item(2)), Some(2));
    assert_eq!(flat.index_of(Node::Item(9)), None);

    assert_eq!(
        flat.insert_at(Node::Item(9), 4),
        Err(ListError::OutOfRange {
            position: 4,
            len: 3
        })
    );
    assert_eq!(
        flat.remove_at(3),
        Err(ListError::OutOfRange {
            position: 3,
            len: 3
        })
    );
    assert_eq!(flat.remove(Node::Item(9)), Err(ListError::NodeNotFound));

    assert_eq!(flat.remove_at(1), Ok(Node::Item(1)));
    assert_eq!(flat.surface().nodes, flat.as_slice());
    assert_eq!(flat.surface().calls, 4);

    flat.clear();
    assert!(flat.is_empty());
    assert!(flat.surface().nodes.is_empty());
    assert_eq!(flat.surface().calls, 6);
}

#[test]
fn fenwick_locates_the_section_holding_an_item_rank() {
    let counts = [0usize, 2, 0, 0, 3, 1, 0];
    let f = Fenwick::from_counts(counts.iter().copied());
    assert_eq!(f.total(), 6);
    assert_eq!(f.prefix_sum(4), 2);

    let mut owner = Vec::new();
    for (s, &c) in counts.iter().enumerate() {
        owner.extend(core::iter::repeat_n(s, c));
    }
    for (rank, &s) in owner.iter().enumerate() {
        assert_eq!(f.lower_bound(rank), s, "rank {rank}");
    }

    let mut pushed = Fenwick::new();
    for &c in &counts {
        pushed.push_value(c);
    }
    for i in 0..=counts.len() {
        assert_eq!(pushed.prefix_sum(i), f.prefix_sum(i));
    }

    pushed.add(2, 4);
    pushed.add(4, -3);
    assert_eq!(pushed.total(), 7);
    assert_eq!(pushed.lower_bound(2), 2);
    assert_eq!(pushed.lower_bound(6), 5);
}

#[test]
fn anchor_skips_empty_sections() {
    let list = loaded(&[&[1, 2], &[], &[], &[3]]);
    let index = list.index();

    let (section, holder) = index.anchor_before(3).unwrap();
    assert_eq!(section, 0);
    assert_eq!(holder.node, list.holder(0, 1).unwrap().node);
    assert!(index.anchor_before(0).is_none());
    assert_eq!(index.anchor_before(99).unwrap().0, 3);

    // Section 2 is empty: one past item (0, 1), plus headers of sections 1 and 2.
    assert_eq!(
        index.locate_insertion_point(list.flat(), 2, 0).unwrap(),
        list.flat_position(0, 1).unwrap() + 3
    );
    // A trailing section that does not exist yet.
    assert_eq!(
        index.locate_insertion_point(list.flat(), 4, 0).unwrap(),
        list.flat().len() + 1
    );
    assert_eq!(
        index.header_insertion_point(list.flat(), 3).unwrap(),
        list.flat_position(3, 0).unwrap()
    );
}

fn random_values(rng: &mut Lcg, next: &mut u32, max: usize) -> Vec<u32> {
    let n = rng.gen_range_usize(0, max + 1);
    (0..n)
        .map(|_| {
            *next += 1;
            *next
        })
        .collect()
}

#[test]
fn random_mutations_keep_the_sequence_consistent() {
    for seed in 1..=24u64 {
        let mut rng = Lcg::new(seed);
        let mut next = 0u32;
        let mut names = 0u32;
        let mut list = ListController::with_surface(
            TestAdapter::default(),
            MirrorSurface::default(),
            ListOptions::new().with_strict(false),
        );

        for _ in 0..120 {
            let sections = list.adapter().sections.len();
            match rng.gen_range_usize(0, 8) {
                0 if sections < 6 => {
                    let at = rng.gen_range_usize(0, sections + 1);
                    let items = random_values(&mut rng, &mut next, 3);
                    names += 1;
                    list.adapter_mut().sections.insert(at, (names, items));
                    list.insert_section(at).unwrap();
                }
                1 if sections > 0 => {
                    let at = rng.gen_range_usize(0, sections);
                    let count = rng.gen_range_usize(1, sections - at + 1);
                    list.adapter_mut().sections.drain(at..at + count);
                    list.remove_sections(at, count).unwrap();
                }
                2 | 3 if sections > 0 => {
                    let s = rng.gen_range_usize(0, sections);
                    let len = list.adapter().sections[s].1.len();
                    let at = rng.gen_range_usize(0, len + 1);
                    let values = random_values(&mut rng, &mut next, 3);
                    let count = values.len();
                    list.adapter_mut().sections[s].1.splice(at..at, values);
                    list.insert_items(s, at, count).unwrap();
                }
                4 if sections > 0 => {
                    let s = rng.gen_range_usize(0, sections);
                    let len = list.adapter().sections[s].1.len();
                    if len > 0 {
                        let at = rng.gen_range_usize(0, len);
                        let count = rng.gen_range_usize(1, len - at + 1);
                        list.adapter_mut().sections[s].1.drain(at..at + count);
                        list.remove_items(s, at, count).unwrap();
                    }
                }
                5 if sections > 0 => {
                    let s = rng.gen_range_usize(0, sections);
                    let values = random_values(&mut rng, &mut next, 4);
                    list.adapter_mut().sections[s].1 = values;
                    list.change_section(s).unwrap();
                }
                6 if sections > 0 => {
                    let s = rng.gen_range_usize(0, sections);
                    let len = list.adapter().sections[s].1.len();
                    if len > 0 {
                        let at = rng.gen_range_usize(0, len);
                        next += 1;
                        list.adapter_mut().sections[s].1[at] = next;
                        list.change_item(s, at).unwrap();
                    }
                }
                7 if rng.gen_bool() => list.reload().unwrap(),
                _ => {}
            }

            assert_consistent(&list);
            assert_eq!(list.surface().nodes, list.flat().as_slice());
        }
    }
}
