//! Default type derivation for metadata keys.
//!
//! The write path needs a target type tag before it can parse a textual
//! value: EXIF keys map to the tag's default TIFF type, IPTC keys to the
//! dataset type of their record, and XMP properties are text unless the
//! property is a known array or language-alternative. Unknown keys get the
//! family's string type, which the value parser accepts for any text.

use crate::store::MetadataFamily;
use crate::value::TypeTag;

/// Derive the type tag the store's schema assigns to `key`.
pub fn default_type_for(family: MetadataFamily, key: &str) -> TypeTag {
    match family {
        MetadataFamily::Exif => exif_default_type(key),
        MetadataFamily::Iptc => iptc_dataset_type(key),
        MetadataFamily::Xmp => xmp_property_type(key),
    }
}

fn exif_default_type(key: &str) -> TypeTag {
    match key {
        "Exif.Image.ImageWidth"
        | "Exif.Image.ImageLength"
        | "Exif.Image.Orientation"
        | "Exif.Image.ResolutionUnit"
        | "Exif.Photo.ISOSpeedRatings"
        | "Exif.Photo.MeteringMode"
        | "Exif.Photo.Flash"
        | "Exif.Photo.ColorSpace" => TypeTag::UnsignedShort,

        "Exif.Photo.PixelXDimension" | "Exif.Photo.PixelYDimension" => TypeTag::UnsignedLong,

        "Exif.Image.XResolution"
        | "Exif.Image.YResolution"
        | "Exif.Photo.ExposureTime"
        | "Exif.Photo.FNumber"
        | "Exif.Photo.FocalLength"
        | "Exif.GPSInfo.GPSLatitude"
        | "Exif.GPSInfo.GPSLongitude"
        | "Exif.GPSInfo.GPSAltitude" => TypeTag::UnsignedRational,

        "Exif.Photo.ShutterSpeedValue" | "Exif.Photo.ExposureBiasValue" => {
            TypeTag::SignedRational
        }

        "Exif.Photo.UserComment" => TypeTag::Comment,
        "Exif.Photo.ExifVersion" | "Exif.Photo.MakerNote" => TypeTag::Undefined,

        // Make, Model, Software, DateTime* and every other text tag.
        _ => TypeTag::AsciiString,
    }
}

fn iptc_dataset_type(key: &str) -> TypeTag {
    match key {
        "Iptc.Envelope.ModelVersion" | "Iptc.Envelope.FileFormat" | "Iptc.Envelope.FileVersion" => {
            TypeTag::UnsignedShort
        }
        "Iptc.Application2.RecordVersion" => TypeTag::UnsignedShort,

        "Iptc.Envelope.DateSent" | "Iptc.Application2.DateCreated"
        | "Iptc.Application2.ReleaseDate" | "Iptc.Application2.ExpirationDate" => TypeTag::Date,

        "Iptc.Envelope.TimeSent" | "Iptc.Application2.TimeCreated"
        | "Iptc.Application2.ReleaseTime" | "Iptc.Application2.ExpirationTime" => TypeTag::Time,

        // CharacterSet, Keywords, Caption, City and the other text datasets.
        _ => TypeTag::String,
    }
}

fn xmp_property_type(key: &str) -> TypeTag {
    match key {
        "Xmp.dc.subject" => TypeTag::XmpBag,
        "Xmp.dc.creator" => TypeTag::XmpSeq,
        "Xmp.dc.title" | "Xmp.dc.description" | "Xmp.dc.rights" => TypeTag::LangAlt,
        _ => TypeTag::XmpText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_known_tags() {
        assert_eq!(
            default_type_for(MetadataFamily::Exif, "Exif.Image.Orientation"),
            TypeTag::UnsignedShort
        );
        assert_eq!(
            default_type_for(MetadataFamily::Exif, "Exif.Photo.ExposureTime"),
            TypeTag::UnsignedRational
        );
        assert_eq!(
            default_type_for(MetadataFamily::Exif, "Exif.Photo.ShutterSpeedValue"),
            TypeTag::SignedRational
        );
    }

    #[test]
    fn exif_text_fallback() {
        assert_eq!(
            default_type_for(MetadataFamily::Exif, "Exif.Image.Make"),
            TypeTag::AsciiString
        );
    }

    #[test]
    fn iptc_dates_and_times() {
        assert_eq!(
            default_type_for(MetadataFamily::Iptc, "Iptc.Application2.DateCreated"),
            TypeTag::Date
        );
        assert_eq!(
            default_type_for(MetadataFamily::Iptc, "Iptc.Application2.TimeCreated"),
            TypeTag::Time
        );
        assert_eq!(
            default_type_for(MetadataFamily::Iptc, "Iptc.Application2.Keywords"),
            TypeTag::String
        );
    }

    #[test]
    fn xmp_arrays_and_lang_alt() {
        assert_eq!(
            default_type_for(MetadataFamily::Xmp, "Xmp.dc.subject"),
            TypeTag::XmpBag
        );
        assert_eq!(
            default_type_for(MetadataFamily::Xmp, "Xmp.dc.creator"),
            TypeTag::XmpSeq
        );
        assert_eq!(
            default_type_for(MetadataFamily::Xmp, "Xmp.dc.title"),
            TypeTag::LangAlt
        );
        assert_eq!(
            default_type_for(MetadataFamily::Xmp, "Xmp.xmp.CreatorTool"),
            TypeTag::XmpText
        );
    }
}
