/// Objects that implement reading and rebuilding OPC packages.
///
/// This module provides the [`Package`] type, an ordered, random-access view of
/// every member of a ZIP-based package, and [`ReplacementSet`], the set of
/// member rewrites produced by a remediation pass. Rebuilding substitutes the
/// replacements and carries every other member over unchanged.
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::phys_pkg::{ArchiveEntry, PhysPkgReader, PhysPkgWriter};
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::debug;

/// An opened package.
///
/// Members keep the order of the archive's central directory. Member names are
/// unique; an archive that repeats a name is rejected when opened.
#[derive(Debug, Clone)]
pub struct Package {
    members: Vec<ArchiveEntry>,
    /// Member name to position in `members`
    index: HashMap<String, usize>,
}

impl Package {
    /// Open a package from raw archive bytes.
    ///
    /// # Errors
    /// [`OpcError::CorruptArchive`] if the bytes are not a readable ZIP archive,
    /// [`OpcError::DuplicateMember`] if a member name occurs twice.
    pub fn open(data: &[u8]) -> Result<Self> {
        let members = PhysPkgReader::read_entries(data)?;

        let mut index = HashMap::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            if index.insert(member.name.clone(), i).is_some() {
                return Err(OpcError::DuplicateMember(member.name.clone()));
            }
        }

        debug!(members = members.len(), "opened package");
        Ok(Self { members, index })
    }

    /// Decompressed bytes of a member, or `None` when the package has no such member.
    ///
    /// A leading `/` (pack URI form) is accepted.
    pub fn read(&self, name: &str) -> Option<&[u8]> {
        let name = name.strip_prefix('/').unwrap_or(name);
        let member = &self.members[*self.index.get(name)?];
        (!member.directory).then_some(member.data.as_slice())
    }

    /// Whether a member with this name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name.strip_prefix('/').unwrap_or(name))
    }

    /// All member names in archive order, directories included.
    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    /// Iterate over member names in archive order.
    pub fn iter_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Get the number of members in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the package is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Required members this package lacks, in [`part_name::REQUIRED`] order.
    pub fn missing_required_parts(&self) -> Vec<String> {
        part_name::REQUIRED
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Write a new archive with `replacements` substituted.
    ///
    /// Replacements are written first, in the order they were inserted, then
    /// every other member in original order with its decompressed bytes
    /// unchanged. Stored members stay stored; everything else is deflated.
    /// A replacement for a name the package does not have adds that member.
    pub fn rebuild(&self, replacements: &ReplacementSet) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();

        for (name, data) in replacements.iter() {
            let stored = self
                .index
                .get(name)
                .is_some_and(|&i| self.members[i].stored);
            if stored {
                writer.write_stored(name, data)?;
            } else {
                writer.write(name, data)?;
            }
        }

        for member in &self.members {
            if replacements.contains(&member.name) {
                continue;
            }
            if member.directory {
                writer.add_directory(&member.name)?;
            } else if member.stored {
                writer.write_stored(&member.name, &member.data)?;
            } else {
                writer.write(&member.name, &member.data)?;
            }
        }

        let bytes = writer.finish()?;
        debug!(
            replaced = replacements.len(),
            bytes = bytes.len(),
            "rebuilt package"
        );
        Ok(bytes)
    }
}

/// Member rewrites produced by one remediation pass.
///
/// At most one entry per member name; inserting a name again replaces the
/// earlier bytes but keeps the original insertion position.
#[derive(Debug, Clone, Default)]
pub struct ReplacementSet {
    entries: SmallVec<[(String, Vec<u8>); 4]>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new bytes for `name`. Last writer wins.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((name, data)),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// Member names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
