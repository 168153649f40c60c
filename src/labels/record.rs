use crate::foundation::core::{BoundingBox, FrameIndex};

/// One visible object in one frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Label {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub bbox: BoundingBox,
}

/// Labels of a single frame, in the order the simulator reported them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameLabels {
    pub frame: FrameIndex,
    pub objects: Vec<Label>,
}

/// Labels for a whole sequence, one entry per frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SequenceLabels {
    pub frames: Vec<FrameLabels>,
}

impl SequenceLabels {
    pub fn push(&mut self, frame: FrameIndex, objects: Vec<Label>) {
        self.frames.push(FrameLabels { frame, objects });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.frames.iter().map(|f| f.objects.len()).sum()
    }

    pub fn get(&self, frame: FrameIndex) -> Option<&FrameLabels> {
        self.frames.iter().find(|f| f.frame == frame)
    }
}
