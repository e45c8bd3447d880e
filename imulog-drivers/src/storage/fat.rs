//! FAT volume usage
//!
//! Reports the data area size and the free space of a FAT16 or FAT32
//! volume in KiB, read straight from the boot sector and the first FAT.
//! The volume is either the whole medium or the first MBR partition.
//!
//! FAT32 answers from the FSInfo free-cluster count when it is in range;
//! otherwise every FAT entry is read. FAT12 volumes are not handled.

use imulog_core::traits::{SpaceInfo, StorageError};

/// Sector size; the only one accepted
pub const BLOCK_LEN: usize = 512;

pub type Block = [u8; BLOCK_LEN];

/// First MBR partition entry
const PARTITION_0: usize = 446;
/// MBR partition type ids that carry a FAT filesystem
const FAT_PARTITION_TYPES: [u8; 6] = [0x01, 0x04, 0x06, 0x0B, 0x0C, 0x0E];

const FSINFO_LEAD_SIG: u32 = 0x4161_5252;
const FSINFO_STRUCT_SIG: u32 = 0x6141_7272;
const FSINFO_FREE_COUNT: usize = 488;

/// Cluster count limits between FAT12, FAT16 and FAT32
const FAT16_MIN_CLUSTERS: u32 = 4085;
const FAT32_MIN_CLUSTERS: u32 = 65525;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FatKind {
    Fat16,
    Fat32,
}

impl FatKind {
    fn entries_per_block(self) -> u32 {
        match self {
            FatKind::Fat16 => (BLOCK_LEN / 2) as u32,
            FatKind::Fat32 => (BLOCK_LEN / 4) as u32,
        }
    }

    fn entry(self, block: &Block, slot: u32) -> u32 {
        let slot = slot as usize;
        match self {
            FatKind::Fat16 => le16(block, slot * 2),
            // Top four bits are reserved
            FatKind::Fat32 => le32(block, slot * 4) & 0x0FFF_FFFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    kind: FatKind,
    fat_start: u32,
    sectors_per_cluster: u32,
    clusters: u32,
    fs_info: Option<u32>,
}

impl Layout {
    fn kib(&self, clusters: u32) -> u32 {
        // Two 512-byte sectors per KiB
        ((clusters as u64 * self.sectors_per_cluster as u64) / 2) as u32
    }
}

fn le16(block: &Block, at: usize) -> u32 {
    u16::from_le_bytes([block[at], block[at + 1]]) as u32
}

fn le32(block: &Block, at: usize) -> u32 {
    u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

fn has_boot_signature(block: &Block) -> bool {
    block[510] == 0x55 && block[511] == 0xAA
}

fn looks_like_boot_sector(block: &Block) -> bool {
    matches!(block[0], 0xEB | 0xE9)
        && le16(block, 11) == BLOCK_LEN as u32
        && block[13].is_power_of_two()
        && matches!(block[16], 1 | 2)
}

/// LBA of the FAT boot sector: sector 0, or the first partition
fn volume_start<F>(read: &mut F, block: &mut Block) -> Result<u32, StorageError>
where
    F: FnMut(u32, &mut Block) -> Result<(), StorageError>,
{
    read(0, block)?;
    if !has_boot_signature(block) {
        return Err(StorageError::Unsupported);
    }
    if looks_like_boot_sector(block) {
        return Ok(0);
    }
    let kind = block[PARTITION_0 + 4];
    if !FAT_PARTITION_TYPES.contains(&kind) {
        return Err(StorageError::Unsupported);
    }
    Ok(le32(block, PARTITION_0 + 8))
}

fn parse_boot_sector(block: &Block, start: u32) -> Result<Layout, StorageError> {
    if !has_boot_signature(block) || !looks_like_boot_sector(block) {
        return Err(StorageError::Unsupported);
    }
    let sectors_per_cluster = block[13] as u32;
    let reserved = le16(block, 14);
    let fats = block[16] as u32;
    let root_entries = le16(block, 17);
    let total = match le16(block, 19) {
        0 => le32(block, 32),
        n => n,
    };
    let fat_size = match le16(block, 22) {
        0 => le32(block, 36),
        n => n,
    };

    let root_sectors = (root_entries * 32).div_ceil(BLOCK_LEN as u32);
    let meta = fats
        .saturating_mul(fat_size)
        .saturating_add(reserved + root_sectors);
    if total <= meta {
        return Err(StorageError::Unsupported);
    }
    let clusters = (total - meta) / sectors_per_cluster;

    if clusters < FAT16_MIN_CLUSTERS {
        return Err(StorageError::Unsupported);
    }
    let kind = if clusters < FAT32_MIN_CLUSTERS {
        FatKind::Fat16
    } else {
        FatKind::Fat32
    };
    let fs_info = match kind {
        FatKind::Fat32 => Some(start + le16(block, 48)),
        FatKind::Fat16 => None,
    };

    Ok(Layout {
        kind,
        fat_start: start + reserved,
        sectors_per_cluster,
        clusters,
        fs_info,
    })
}

/// FSInfo free count, if the sector is valid and the count plausible
fn fs_info_free<F>(
    read: &mut F,
    layout: &Layout,
    block: &mut Block,
) -> Result<Option<u32>, StorageError>
where
    F: FnMut(u32, &mut Block) -> Result<(), StorageError>,
{
    let Some(lba) = layout.fs_info else {
        return Ok(None);
    };
    read(lba, block)?;
    if le32(block, 0) != FSINFO_LEAD_SIG || le32(block, 484) != FSINFO_STRUCT_SIG {
        return Ok(None);
    }
    let free = le32(block, FSINFO_FREE_COUNT);
    Ok((free <= layout.clusters).then_some(free))
}

/// Count zero entries for clusters 2 ..= clusters + 1
fn scan_free<F>(read: &mut F, layout: &Layout, block: &mut Block) -> Result<u32, StorageError>
where
    F: FnMut(u32, &mut Block) -> Result<(), StorageError>,
{
    let per_block = layout.kind.entries_per_block();
    let end = layout.clusters + 2;
    let mut free = 0;
    let mut first = 0u32;
    let mut lba = layout.fat_start;

    while first < end {
        read(lba, block)?;
        let slots = per_block.min(end - first);
        for slot in 0..slots {
            if first + slot >= 2 && layout.kind.entry(block, slot) == 0 {
                free += 1;
            }
        }
        first += per_block;
        lba += 1;
    }
    Ok(free)
}

/// Size and free space of the volume behind `read`
///
/// `read` fills one 512-byte block by LBA.
pub fn volume_usage<F>(mut read: F) -> Result<SpaceInfo, StorageError>
where
    F: FnMut(u32, &mut Block) -> Result<(), StorageError>,
{
    let mut block = [0u8; BLOCK_LEN];
    let start = volume_start(&mut read, &mut block)?;
    if start != 0 {
        read(start, &mut block)?;
    }
    let layout = parse_boot_sector(&block, start)?;

    let free = match fs_info_free(&mut read, &layout, &mut block)? {
        Some(free) => free,
        None => scan_free(&mut read, &layout, &mut block)?,
    };

    Ok(SpaceInfo {
        total_kib: layout.kib(layout.clusters),
        free_kib: layout.kib(free),
    })
}
