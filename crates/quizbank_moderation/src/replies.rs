//! Texts posted back to the channel.

/// Reply to a malformed add command.
pub const ADD_USAGE: &str = "Voici comment utiliser la commande :\n```\n!ajouter [question]\n[bonne réponse]\n[mauvaise réponse]\n[mauvaise réponse]\n[mauvaise réponse]\n```";

/// Reply to a delete command without an argument.
pub const DELETE_USAGE: &str =
    "Voici comment utiliser la commande :\n```\n!supprimer [identifiant question]\n```";

/// Reply to a delete command naming an unusable or unknown id.
pub const INVALID_QUESTION_ID: &str = "Le numéro de la question est invalide !";
