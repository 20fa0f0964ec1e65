#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySet {
    pub parties: Vec<String>,
    pub amounts: Vec<String>,
    pub dates: Vec<String>,
    pub terms: Vec<String>,
}

impl EntitySet {
    pub fn get(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Parties => &self.parties,
            EntityKind::Amounts => &self.amounts,
            EntityKind::Dates => &self.dates,
            EntityKind::Terms => &self.terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Parties,
    Amounts,
    Dates,
    Terms,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Parties,
        EntityKind::Amounts,
        EntityKind::Dates,
        EntityKind::Terms,
    ];
}
