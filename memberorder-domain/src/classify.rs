//! Member classification: every member maps to exactly one [`SortKey`].

use memberorder_types::container::{Container, ContainerKind};
use memberorder_types::member::{Accessibility, Member, MemberKind, Modifier};
use memberorder_types::syntax::Token;

/// Member-type rank for kinds this version does not recognize. Places them after every known
/// kind.
pub const FALLBACK_RANK: u32 = 100;

/// The canonical member categories, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberCategory {
    ConstField = 1,
    StaticReadonlyField = 2,
    StaticField = 3,
    ReadonlyField = 4,
    Field = 5,
    StaticConstructor = 6,
    Constructor = 7,
    Destructor = 8,
    Delegate = 9,
    Event = 10,
    Property = 11,
    Indexer = 12,
    Method = 13,
    ConversionOperator = 14,
    Operator = 15,
    NestedEnum = 16,
    NestedInterface = 17,
    NestedStruct = 18,
    NestedRecordStruct = 19,
    NestedRecord = 20,
    NestedClass = 21,
}

impl MemberCategory {
    pub const ALL: [MemberCategory; 21] = [
        MemberCategory::ConstField,
        MemberCategory::StaticReadonlyField,
        MemberCategory::StaticField,
        MemberCategory::ReadonlyField,
        MemberCategory::Field,
        MemberCategory::StaticConstructor,
        MemberCategory::Constructor,
        MemberCategory::Destructor,
        MemberCategory::Delegate,
        MemberCategory::Event,
        MemberCategory::Property,
        MemberCategory::Indexer,
        MemberCategory::Method,
        MemberCategory::ConversionOperator,
        MemberCategory::Operator,
        MemberCategory::NestedEnum,
        MemberCategory::NestedInterface,
        MemberCategory::NestedStruct,
        MemberCategory::NestedRecordStruct,
        MemberCategory::NestedRecord,
        MemberCategory::NestedClass,
    ];

    pub fn rank(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberCategory::ConstField => "const field",
            MemberCategory::StaticReadonlyField => "static readonly field",
            MemberCategory::StaticField => "static field",
            MemberCategory::ReadonlyField => "readonly field",
            MemberCategory::Field => "field",
            MemberCategory::StaticConstructor => "static constructor",
            MemberCategory::Constructor => "constructor",
            MemberCategory::Destructor => "destructor",
            MemberCategory::Delegate => "delegate",
            MemberCategory::Event => "event",
            MemberCategory::Property => "property",
            MemberCategory::Indexer => "indexer",
            MemberCategory::Method => "method",
            MemberCategory::ConversionOperator => "conversion operator",
            MemberCategory::Operator => "operator",
            MemberCategory::NestedEnum => "nested enum",
            MemberCategory::NestedInterface => "nested interface",
            MemberCategory::NestedStruct => "nested struct",
            MemberCategory::NestedRecordStruct => "nested record struct",
            MemberCategory::NestedRecord => "nested record",
            MemberCategory::NestedClass => "nested class",
        }
    }
}

/// Category of a member, or `None` for kinds without a canonical slot.
pub fn category(member: &Member) -> Option<MemberCategory> {
    let category = match member.kind {
        MemberKind::Field => {
            let is_const = member.has_modifier(Modifier::Const);
            let is_static = member.has_modifier(Modifier::Static);
            let is_readonly = member.has_modifier(Modifier::Readonly);
            match (is_const, is_static, is_readonly) {
                (true, _, _) => MemberCategory::ConstField,
                (false, true, true) => MemberCategory::StaticReadonlyField,
                (false, true, false) => MemberCategory::StaticField,
                (false, false, true) => MemberCategory::ReadonlyField,
                (false, false, false) => MemberCategory::Field,
            }
        }
        MemberKind::Constructor if member.has_modifier(Modifier::Static) => {
            MemberCategory::StaticConstructor
        }
        MemberKind::Constructor => MemberCategory::Constructor,
        MemberKind::Destructor => MemberCategory::Destructor,
        MemberKind::Delegate => MemberCategory::Delegate,
        MemberKind::Event | MemberKind::EventField => MemberCategory::Event,
        MemberKind::Property => MemberCategory::Property,
        MemberKind::Indexer => MemberCategory::Indexer,
        MemberKind::Method => MemberCategory::Method,
        MemberKind::ConversionOperator => MemberCategory::ConversionOperator,
        MemberKind::Operator => MemberCategory::Operator,
        MemberKind::Enum => MemberCategory::NestedEnum,
        MemberKind::Interface => MemberCategory::NestedInterface,
        MemberKind::Struct => MemberCategory::NestedStruct,
        MemberKind::RecordStruct => MemberCategory::NestedRecordStruct,
        MemberKind::Record => MemberCategory::NestedRecord,
        MemberKind::Class => MemberCategory::NestedClass,
        MemberKind::Unknown => return None,
    };
    Some(category)
}

pub fn member_type_rank(member: &Member) -> u32 {
    category(member).map_or(FALLBACK_RANK, MemberCategory::rank)
}

pub fn accessibility_rank(member: &Member, container: ContainerKind) -> u32 {
    let accessibility = member.accessibility().unwrap_or(if container.is_interface_like() {
        Accessibility::Public
    } else {
        Accessibility::Private
    });

    match accessibility {
        Accessibility::Public => 1,
        Accessibility::Internal => 2,
        Accessibility::ProtectedInternal => 3,
        Accessibility::Protected => 4,
        Accessibility::PrivateProtected => 5,
        Accessibility::Private => 6,
    }
}

pub fn static_instance_rank(member: &Member) -> u32 {
    if member.is_static() { 1 } else { 2 }
}

pub fn extern_rank(member: &Member) -> u32 {
    if member.has_interop_marker() { 2 } else { 1 }
}

/// The token a member sorts and reports by.
///
/// Indexers sort by their keyword, operators by their symbol and conversion operators by the
/// first token of their target type. A missing mark, or an unknown kind, falls back to the
/// member's first token; only a member without tokens yields `None`.
pub fn identifier(member: &Member) -> Option<&Token> {
    let mark = match member.kind {
        MemberKind::Indexer => member.marks.keyword,
        MemberKind::Operator => member.marks.operator,
        MemberKind::ConversionOperator => member.marks.target_type,
        MemberKind::Unknown => None,
        _ => member.marks.name,
    };
    member.token(mark).or_else(|| member.tokens.first())
}

pub fn identifier_text(member: &Member) -> &str {
    identifier(member).map_or("", |t| t.text.as_str())
}

/// Equivalence class that spacing decisions key off. The identifier plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
    pub member_type: u32,
    pub accessibility: u32,
    pub static_instance: u32,
    pub extern_rank: u32,
}

/// Total order over members. Field order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortKey {
    pub member_type: u32,
    pub accessibility: u32,
    pub extern_rank: u32,
    pub static_instance: u32,
    /// Identifier folded to upper case, so `alpha` and `Alpha` sort together.
    pub identifier_ci: String,
    pub identifier: String,
}

impl SortKey {
    pub fn group(&self) -> Group {
        Group {
            member_type: self.member_type,
            accessibility: self.accessibility,
            static_instance: self.static_instance,
            extern_rank: self.extern_rank,
        }
    }
}

pub fn sort_key(member: &Member, container: ContainerKind) -> SortKey {
    let identifier = identifier_text(member);
    SortKey {
        member_type: member_type_rank(member),
        accessibility: accessibility_rank(member, container),
        extern_rank: extern_rank(member),
        static_instance: static_instance_rank(member),
        identifier_ci: identifier.to_uppercase(),
        identifier: identifier.to_string(),
    }
}

pub fn sort_keys(container: &Container) -> Vec<SortKey> {
    container
        .members
        .iter()
        .map(|m| sort_key(m, container.kind))
        .collect()
}

/// Target permutation: `order[position]` is the original index of the member that belongs at
/// `position`. The sort is stable, so members with equal keys (overloads) keep their relative
/// order.
pub fn target_order(keys: &[SortKey]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    order
}
