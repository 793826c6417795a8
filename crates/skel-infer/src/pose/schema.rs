/// Number of keypoints in the COCO / MoveNet single-person layout
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// Canonical joint names in index order
pub const COCO_KEYPOINT_NAMES: [&str; COCO_KEYPOINT_COUNT] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    pub fn name(self) -> &'static str {
        COCO_KEYPOINT_NAMES[self as usize]
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid keypoint index: {}. Must be in range 0-{}.",
                value,
                COCO_KEYPOINT_COUNT - 1
            )
        })
    }
}

/// Body region used to pick overlay colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRegion {
    Face,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyRegion {
    /// Region of a joint by index.
    ///
    /// Pure index banding over the COCO joint order, no per-joint labels:
    /// 0-4 face, 5-6 torso, 7-10 arms and 11-16 legs with odd indices on the
    /// left and even on the right. Shoulders count as torso and hips as legs.
    /// Anything past 16 falls through to right leg.
    ///
    /// The 33-landmark banding (0-10 face, 11-22 arms, 23-32 legs) is not
    /// used: on 17 joints it would color shoulders, elbows and wrists as
    /// face. The seams of index banding are kept as they are, so a segment
    /// leaving a shoulder is torso-colored while the elbow it reaches is arm.
    pub fn of_index(index: usize) -> BodyRegion {
        match index {
            0..=4 => BodyRegion::Face,
            5..=6 => BodyRegion::Torso,
            7..=10 if index % 2 == 1 => BodyRegion::LeftArm,
            7..=10 => BodyRegion::RightArm,
            11..=16 if index % 2 == 1 => BodyRegion::LeftLeg,
            _ => BodyRegion::RightLeg,
        }
    }
}

/// A segment between two joints, drawn when both endpoints are confident
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

impl Connection {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// A connection takes the region of its start joint
    pub fn region(&self) -> BodyRegion {
        BodyRegion::of_index(self.from)
    }
}

/// MoveNet skeleton edges
pub const COCO_CONNECTIONS: [Connection; 16] = [
    // face
    Connection::new(0, 1),
    Connection::new(0, 2),
    Connection::new(1, 3),
    Connection::new(2, 4),
    // shoulders and arms
    Connection::new(5, 6),
    Connection::new(5, 7),
    Connection::new(7, 9),
    Connection::new(6, 8),
    Connection::new(8, 10),
    // torso
    Connection::new(5, 11),
    Connection::new(6, 12),
    Connection::new(11, 12),
    // legs
    Connection::new(11, 13),
    Connection::new(13, 15),
    Connection::new(12, 14),
    Connection::new(14, 16),
];

/// Joint names plus the connection graph over them. Immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct KeypointSchema {
    names: &'static [&'static str],
    connections: &'static [Connection],
}

pub static COCO_SCHEMA: KeypointSchema =
    KeypointSchema::new(&COCO_KEYPOINT_NAMES, &COCO_CONNECTIONS);

impl KeypointSchema {
    pub const fn new(names: &'static [&'static str], connections: &'static [Connection]) -> Self {
        Self { names, connections }
    }

    /// Number of joints, K
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    pub fn connections(&self) -> &'static [Connection] {
        self.connections
    }

    pub fn region(&self, index: usize) -> BodyRegion {
        BodyRegion::of_index(index)
    }

    /// True when every connection endpoint is a valid joint index
    pub fn is_consistent(&self) -> bool {
        self.connections
            .iter()
            .all(|c| c.from < self.len() && c.to < self.len())
    }
}
