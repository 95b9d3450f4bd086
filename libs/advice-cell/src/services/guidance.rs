use tracing::debug;

/// Offline guidance for one health topic. Every keyword group must have at
/// least one keyword contained in the lowercased query.
struct GuidanceTopic {
    name: &'static str,
    keyword_groups: &'static [&'static [&'static str]],
    body: &'static str,
}

/// Checked in order; the first topic whose groups all match wins.
const GUIDANCE_TOPICS: [GuidanceTopic; 13] = [
    GuidanceTopic {
        name: "chest_pain",
        keyword_groups: &[&["chest pain", "heart pain"]],
        body: "🫀 **Chest Pain Assessment & Guidance**

Chest pain ranges from muscle strain to heart problems, so treat it seriously.

**Right Now:**
• Stop what you are doing and rest sitting upright
• Loosen anything tight around your chest or neck
• Breathe slowly and deeply
• Use prescribed nitroglycerin only as directed

**Call Emergency Services If:**
• The pain is crushing, squeezing or feels like pressure
• It spreads to your arm, jaw, neck or back
• You are short of breath, sweating, nauseous or dizzy
• It lasts longer than 5 minutes

**Often Less Serious:**
• Strained chest muscles after lifting or exercise
• Heartburn or acid reflux
• Stress and anxiety

**Follow-up:** Have any chest pain checked by a healthcare provider, even if it has eased.",
    },
    GuidanceTopic {
        name: "severe_headache",
        keyword_groups: &[&["headache"], &["severe", "worst"]],
        body: "🤕 **Severe Headache Management**

A severe headache deserves prompt attention and a proper assessment.

**Seek Emergency Care If:**
• It is the worst headache of your life or came on suddenly
• You also have fever and a stiff neck
• It follows a head injury
• Your vision changes, or you feel confused, weak or numb

**Relief Measures:**
• Rest in a dark, quiet room
• Cold compress on the forehead, warmth on the neck and shoulders
• Sip water steadily
• Take pain relief as directed and do not mix medicines

**Common Triggers:**
• Dehydration or skipped meals
• Poor sleep and stress
• Some foods such as aged cheese, wine or chocolate

**Next Step:** Recurring or severe headaches should be evaluated so the cause can be treated.",
    },
    GuidanceTopic {
        name: "back_pain",
        keyword_groups: &[&["back pain", "lower back"]],
        body: "🦴 **Back Pain Relief & Management**

Back pain is very common and usually settles with sensible care.

**Relief:**
• Lie on your side with your knees bent
• Ice for the first 24-48 hours after an injury, then heat
• Keep gently moving rather than staying in bed
• Anti-inflammatory medication as directed

**Gentle Exercises When Pain Allows:**
• Knee-to-chest stretches and pelvic tilts
• Short walks, building up slowly

**Seek Immediate Care If:**
• The pain follows a fall or injury
• Your legs feel numb, tingly or weak
• You lose bladder or bowel control
• You also have a fever

**Outlook:** Most back pain improves within days to a few weeks.",
    },
    GuidanceTopic {
        name: "high_fever",
        keyword_groups: &[&["fever"], &["high"]],
        body: "🌡️ **High Fever Management**

A high fever needs close monitoring.

**What To Do:**
• Check your temperature every 2-3 hours
• Drink plenty of fluids: water, broths, electrolyte drinks
• Wear light clothing and take a lukewarm bath
• Use fever-reducing medication as directed

**Seek Emergency Care If:**
• Temperature is above 103°F (39.4°C)
• You have trouble breathing or chest pain
• You have a severe headache or stiff neck
• You keep vomiting, feel confused or show signs of dehydration

**Call a Doctor If:** the fever lasts more than 3 days or you have an underlying condition.",
    },
    GuidanceTopic {
        name: "concerning_cough",
        keyword_groups: &[&["cough"], &["blood", "persistent"]],
        body: "🫁 **Concerning Cough Assessment**

A persistent cough, or any cough that brings up blood, needs a medical evaluation.

**Seek Immediate Care If:**
• You cough up blood, in any amount
• Breathing is very difficult
• You have chest pain or a high fever with the cough

**Meanwhile:**
• Stay well hydrated and use steam or a humidifier
• A spoon of honey can soothe the throat
• Sleep with your head raised
• Avoid smoke and strong odours

**Track:** how long it has lasted, what triggers it, and any fever or breathlessness.",
    },
    GuidanceTopic {
        name: "breathing_difficulty",
        keyword_groups: &[&["shortness of breath", "breathing"]],
        body: "🫁 **Breathing Difficulty Management**

Breathing problems range from mild to serious and should be assessed.

**Seek Emergency Care Immediately If:**
• You are gasping or cannot speak in full sentences
• Your lips, fingernails or face turn blue
• You have chest pain with the breathlessness
• It started suddenly and severely

**Comfort Measures:**
• Sit upright or lean slightly forward
• Try pursed-lip breathing: in through the nose, slowly out through pursed lips
• Keep calm and let fresh air circulate

**Common Causes:** asthma, allergies, anxiety, infections or overexertion.

**Important:** Have breathing difficulties evaluated by a healthcare professional.",
    },
    GuidanceTopic {
        name: "nausea",
        keyword_groups: &[&["nausea", "vomiting"]],
        body: "🤢 **Nausea & Vomiting Relief**

Nausea and vomiting usually ease with rest and careful hydration.

**Relief:**
• Small sips of clear fluids every 15-20 minutes
• Ice chips, ginger tea or peppermint tea
• Fresh air and a cool cloth on the forehead

**When Ready To Eat:** bananas, rice, applesauce and toast in small amounts.

**Seek Medical Care If:**
• You cannot keep fluids down for 24 hours
• You notice dark urine, dizziness or a dry mouth
• There is blood in the vomit
• You have severe abdominal pain, high fever or a severe headache",
    },
    GuidanceTopic {
        name: "abdominal_pain",
        keyword_groups: &[&["pain", "hurt"], &["stomach", "abdominal"]],
        body: "🩻 **Abdominal Pain Assessment**

Stomach pain has many causes that need different care.

**Immediate Care:**
• Hold off eating until the pain eases
• Sip clear fluids slowly
• Gentle heat on the area

**Seek Emergency Care If:**
• The pain is sudden and severe, or your abdomen is hard
• You have fever and vomiting with the pain
• There is blood in your stool or vomit

**Call a Provider If:** the pain lasts beyond 24-48 hours or keeps getting worse.",
    },
    GuidanceTopic {
        name: "joint_pain",
        keyword_groups: &[&["pain", "hurt"], &["joint", "arthritis"]],
        body: "🦴 **Joint Pain Management**

Joint pain often responds well to steady, sensible care.

**Relief:**
• Rest the joint; ice for swelling, heat for stiffness
• Gentle range-of-motion exercises
• Anti-inflammatory medication as directed

**Day To Day:**
• Low-impact exercise such as swimming or walking
• Keep a healthy weight and balance activity with rest

**Warning Signs:**
• Sudden severe pain or a joint you cannot use
• Redness, warmth or fever around the joint
• Morning stiffness that lasts for hours",
    },
    GuidanceTopic {
        name: "general_pain",
        keyword_groups: &[&["pain", "hurt"]],
        body: "⚡ **General Pain Relief Guide**

Pain is a signal that something needs attention.

**Relief:**
• Rest the affected area
• Ice for fresh injuries, heat for muscle tension
• Over-the-counter pain relief as directed

**Keep Track:**
• Rate the pain from 1 to 10
• Note what makes it better or worse

**Seek Medical Care If:**
• The pain is 7/10 or worse
• It lasts longer than expected or interferes with daily life
• You see signs of infection or serious injury",
    },
    GuidanceTopic {
        name: "anxiety",
        keyword_groups: &[&["anxiety", "stress", "panic"]],
        body: "🧘 **Anxiety & Stress Response Plan**

Anxiety is the body's response to perceived threat, and it can be managed.

**Calm Down Now:**
• 4-7-8 breathing: in for 4, hold for 7, out for 8
• 5-4-3-2-1 grounding: name things you see, hear, touch, smell and taste
• Cold water on your wrists and face

**Daily Habits:**
• Regular movement, even short walks
• Less caffeine, a steady sleep schedule
• Stay connected with people you trust

**Seek Professional Help If:**
• Anxiety gets in the way of daily life or sleep
• You avoid activities because of it
• You have thoughts of self-harm",
    },
    GuidanceTopic {
        name: "sleep",
        keyword_groups: &[&["insomnia", "can't sleep", "sleep trouble"]],
        body: "😴 **Sleep Difficulty Solutions**

Sleep problems are common and usually respond to a few changes.

**Tonight:**
• No screens for an hour before bed
• Keep the room cool, dark and quiet
• If you are still awake after 20 minutes, get up and do something quiet

**Sleep Habits:**
• Same bedtime and wake time every day
• Morning daylight, no caffeine after 2 PM
• Keep naps short and early

**Seek Help If:** insomnia lasts more than a month, or you snore with pauses in breathing.",
    },
    GuidanceTopic {
        name: "fatigue",
        keyword_groups: &[&["tired", "fatigue", "exhausted"]],
        body: "😴 **Fatigue & Energy Recovery Plan**

Ongoing tiredness has many possible causes.

**Quick Boosts:**
• A short walk outside in daylight
• A large glass of water and a snack with protein

**Common Causes:**
• Dehydration or poor sleep
• Low iron, B12 or vitamin D
• Stress or too little movement

**See a Healthcare Provider If:**
• Fatigue is sudden and severe
• It lasts for weeks despite good sleep
• It comes with fever, weight loss or low mood",
    },
];

const GENERAL_GUIDANCE: &str = "🌟 **Personalized Health Guidance**

Every symptom is your body communicating something, so it is worth paying attention.

**Assess:**
• Note when it started and what triggers it
• Rate its severity from 1 to 10
• Consider recent changes in diet, activity, stress or medication

**Support Your Body:**
• Drink 8-10 glasses of water a day
• Rest and eat whole foods
• Keep gently active as tolerated

**Seek Professional Care If:**
• Symptoms worsen despite self-care
• New or unusual symptoms appear
• They interfere with daily activities

**Remember:** if something feels wrong, it is always appropriate to seek medical advice.";

/// Topic-specific offline guidance for a health question. Falls back to
/// general guidance when no topic matches.
pub fn local_guidance(query: &str) -> &'static str {
    let lower = query.to_lowercase();

    let topic = GUIDANCE_TOPICS.iter().find(|topic| {
        topic
            .keyword_groups
            .iter()
            .all(|group| group.iter().any(|keyword| lower.contains(keyword)))
    });

    match topic {
        Some(topic) => {
            debug!("Offline guidance topic: {}", topic.name);
            topic.body
        }
        None => GENERAL_GUIDANCE,
    }
}
